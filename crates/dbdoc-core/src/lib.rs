//! dbdoc Core - schema documentation rendering
//!
//! This crate turns database schema metadata into human-readable
//! documentation: Markdown tables, or a Graphviz diagram with one node per
//! table.
//!
//! # Main Components
//!
//! - **Schema Model**: [`TableInfo`], [`ColumnInfo`] and [`CommentOverrides`]
//! - **Builders**: [`MarkdownBuilder`] and [`GraphBuilder`] string templates
//! - **Comment Resolution**: [`CommentPolicy`] picks the displayed comment
//! - **Assembler**: [`DocumentAssembler`] drives a [`SchemaProvider`] and
//!   writes the finished document
//! - **Comment Sources**: [`MigrationScanner`] reads table comments from
//!   migration files
//!
//! # Example
//!
//! ```
//! use dbdoc_core::{
//!     AssemblerOptions, ColumnInfo, CommentOverrides, DocumentAssembler,
//!     SchemaSnapshot, SnapshotProvider, TableInfo,
//! };
//!
//! let snapshot = SchemaSnapshot::new().push(
//!     TableInfo::new("users").with_engine("InnoDB").with_collation("utf8mb4_general_ci"),
//!     vec![ColumnInfo::new("id", "int(10) unsigned", "NO", "primary key")],
//! );
//!
//! let mut assembler = DocumentAssembler::new(
//!     SnapshotProvider::new(snapshot),
//!     CommentOverrides::new(),
//!     AssemblerOptions::default(),
//! );
//! let doc = assembler.render().unwrap();
//! assert!(doc.starts_with("## users"));
//! ```

pub mod assembler;
pub mod comment;
pub mod error;
pub mod graph;
pub mod markdown;
pub mod migration;
pub mod provider;
pub mod schema;

// Re-export main types for convenience
pub use assembler::{AssemblerOptions, DocumentAssembler, OutputMode, DEFAULT_COLUMN_TITLES};
pub use comment::{CommentPolicy, DEFAULT_PLACEHOLDER};
pub use error::{Error, Result};
pub use graph::{GraphBuilder, LabelSpec, DEFAULT_NODE_PREFIX};
pub use markdown::{Alignment, MarkdownBuilder, TableSpec};
pub use migration::{CommentSource, MigrationScanner, DEFAULT_EXTENSIONS};
pub use provider::{SchemaProvider, SchemaSnapshot, SnapshotProvider, TableSnapshot};
pub use schema::{ColumnInfo, CommentOverrides, TableInfo};

#[cfg(feature = "mysql")]
pub use provider::{ConnectionParams, MysqlProvider};
