//! Schema model populated from introspection
//!
//! These records mirror one row of the server's table-status and full-columns
//! listings. They are built once per run and never mutated while rendering.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Metadata for one column, in the order the database reports it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    /// Column name
    pub name: String,
    /// Declared type, e.g. `int(10) unsigned`
    pub field_type: String,
    /// Column collation (NULL for non-text columns)
    #[serde(default)]
    pub collation: Option<String>,
    /// Nullability as reported by the server (`YES` / `NO`)
    pub nullable: String,
    /// Key designation (`PRI`, `UNI`, `MUL` or empty)
    #[serde(default)]
    pub key: String,
    /// Default value
    #[serde(default)]
    pub default: Option<String>,
    /// Extra attributes such as `auto_increment`
    #[serde(default)]
    pub extra: String,
    /// Privileges the connecting user holds on the column
    #[serde(default)]
    pub privileges: String,
    /// Free-text column comment
    #[serde(default)]
    pub comment: String,
}

impl ColumnInfo {
    /// Create a column with the four fields that appear in rendered output
    pub fn new(
        name: impl Into<String>,
        field_type: impl Into<String>,
        nullable: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            collation: None,
            nullable: nullable.into(),
            key: String::new(),
            default: None,
            extra: String::new(),
            privileges: String::new(),
            comment: comment.into(),
        }
    }

    /// Set the key designation
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }
}

/// Metadata for one table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableInfo {
    pub name: String,
    #[serde(default)]
    pub engine: Option<String>,
    #[serde(default)]
    pub version: Option<u64>,
    #[serde(default)]
    pub row_format: Option<String>,
    /// Row count estimate
    #[serde(default)]
    pub rows: Option<u64>,
    #[serde(default)]
    pub avg_row_length: Option<u64>,
    #[serde(default)]
    pub data_length: Option<u64>,
    #[serde(default)]
    pub max_data_length: Option<u64>,
    #[serde(default)]
    pub index_length: Option<u64>,
    #[serde(default)]
    pub data_free: Option<u64>,
    #[serde(default)]
    pub auto_increment: Option<u64>,
    #[serde(default)]
    pub create_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub update_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub check_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub collation: Option<String>,
    #[serde(default)]
    pub checksum: Option<u64>,
    #[serde(default)]
    pub create_options: Option<String>,
    /// Native table comment; empty when the database has none
    #[serde(default)]
    pub comment: String,
}

impl TableInfo {
    /// Create a table record with only a name; every statistic is unknown
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            engine: None,
            version: None,
            row_format: None,
            rows: None,
            avg_row_length: None,
            data_length: None,
            max_data_length: None,
            index_length: None,
            data_free: None,
            auto_increment: None,
            create_time: None,
            update_time: None,
            check_time: None,
            collation: None,
            checksum: None,
            create_options: None,
            comment: String::new(),
        }
    }

    /// Set the storage engine
    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = Some(engine.into());
        self
    }

    /// Set the table collation
    pub fn with_collation(mut self, collation: impl Into<String>) -> Self {
        self.collation = Some(collation.into());
        self
    }

    /// Set the native comment
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

/// Table comments recovered from outside the database
///
/// Inserting a name that is already present replaces the earlier comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentOverrides {
    entries: HashMap<String, String>,
}

impl CommentOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a comment for a table, returning the one it replaced
    pub fn insert(&mut self, table: impl Into<String>, comment: impl Into<String>) -> Option<String> {
        self.entries.insert(table.into(), comment.into())
    }

    pub fn get(&self, table: &str) -> Option<&str> {
        self.entries.get(table).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for CommentOverrides
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut overrides = Self::new();
        for (table, comment) in iter {
            overrides.insert(table, comment);
        }
        overrides
    }
}
