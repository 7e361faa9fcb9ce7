//! Offline schema snapshots
//!
//! A snapshot is the full result of one introspection run saved as JSON, so
//! documentation can be regenerated without database access.

use super::SchemaProvider;
use crate::error::{Error, Result};
use crate::schema::{ColumnInfo, TableInfo};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// One table and its columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub info: TableInfo,
    pub columns: Vec<ColumnInfo>,
}

/// Every table of a schema in provider order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaSnapshot {
    pub tables: Vec<TableSnapshot>,
}

impl SchemaSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, info: TableInfo, columns: Vec<ColumnInfo>) -> Self {
        self.tables.push(TableSnapshot { info, columns });
        self
    }

    /// Read every table through `provider`
    pub fn capture<P: SchemaProvider>(provider: &mut P) -> Result<Self> {
        let mut snapshot = Self::new();
        for name in provider.list_tables()? {
            let info = provider.table_info(&name)?;
            let columns = provider.columns(&name)?;
            debug!(table = %name, columns = columns.len(), "Captured table");
            snapshot.tables.push(TableSnapshot { info, columns });
        }
        info!(tables = snapshot.tables.len(), "Schema snapshot captured");
        Ok(snapshot)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| Error::Snapshot {
            message: "failed to decode snapshot".to_string(),
            source: e,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Snapshot {
            message: "failed to encode snapshot".to_string(),
            source: e,
        })
    }

    /// Load a snapshot written by [`SchemaSnapshot::save`]
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Write the snapshot as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_json()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }
}

/// Provider that serves tables from a [`SchemaSnapshot`]
#[derive(Debug, Clone)]
pub struct SnapshotProvider {
    snapshot: SchemaSnapshot,
}

impl SnapshotProvider {
    pub fn new(snapshot: SchemaSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        SchemaSnapshot::from_file(path).map(Self::new)
    }

    fn find(&self, name: &str) -> Result<&TableSnapshot> {
        self.snapshot
            .tables
            .iter()
            .find(|t| t.info.name == name)
            .ok_or_else(|| Error::provider(format!("table {} not found in snapshot", name)))
    }
}

impl From<SchemaSnapshot> for SnapshotProvider {
    fn from(snapshot: SchemaSnapshot) -> Self {
        Self::new(snapshot)
    }
}

impl SchemaProvider for SnapshotProvider {
    fn list_tables(&mut self) -> Result<Vec<String>> {
        Ok(self
            .snapshot
            .tables
            .iter()
            .map(|t| t.info.name.clone())
            .collect())
    }

    fn table_info(&mut self, name: &str) -> Result<TableInfo> {
        self.find(name).map(|t| t.info.clone())
    }

    fn columns(&mut self, name: &str) -> Result<Vec<ColumnInfo>> {
        self.find(name).map(|t| t.columns.clone())
    }
}
