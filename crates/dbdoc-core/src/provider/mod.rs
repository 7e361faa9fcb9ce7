//! Schema introspection providers
//!
//! The assembler only sees the [`SchemaProvider`] trait. `MysqlProvider` talks
//! to a live server; `SnapshotProvider` replays a previously captured run.

#[cfg(feature = "mysql")]
pub mod mysql;
pub mod snapshot;

#[cfg(feature = "mysql")]
pub use mysql::{ConnectionParams, MysqlProvider};
pub use snapshot::{SchemaSnapshot, SnapshotProvider, TableSnapshot};

use crate::error::Result;
use crate::schema::{ColumnInfo, TableInfo};

/// Source of table and column metadata
///
/// Implementations must return tables and columns in the database's native
/// order and fail with [`crate::Error::Provider`] for unknown tables or lost
/// connections.
pub trait SchemaProvider {
    /// Names of every table in the schema
    fn list_tables(&mut self) -> Result<Vec<String>>;

    /// Status row for one table
    fn table_info(&mut self, name: &str) -> Result<TableInfo>;

    /// Columns of one table, in ordinal order
    fn columns(&mut self, name: &str) -> Result<Vec<ColumnInfo>>;
}

impl<P: SchemaProvider + ?Sized> SchemaProvider for &mut P {
    fn list_tables(&mut self) -> Result<Vec<String>> {
        (**self).list_tables()
    }

    fn table_info(&mut self, name: &str) -> Result<TableInfo> {
        (**self).table_info(name)
    }

    fn columns(&mut self, name: &str) -> Result<Vec<ColumnInfo>> {
        (**self).columns(name)
    }
}

impl<P: SchemaProvider + ?Sized> SchemaProvider for Box<P> {
    fn list_tables(&mut self) -> Result<Vec<String>> {
        (**self).list_tables()
    }

    fn table_info(&mut self, name: &str) -> Result<TableInfo> {
        (**self).table_info(name)
    }

    fn columns(&mut self, name: &str) -> Result<Vec<ColumnInfo>> {
        (**self).columns(name)
    }
}
