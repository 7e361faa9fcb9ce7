//! Configuration management for the CLI
//!
//! Settings are resolved in this order, later sources winning:
//! - Default values
//! - Configuration files (YAML/JSON)
//! - Environment variables (`DBDOC_HOST`, `DBDOC_PORT`, ...)
//! - Command-line arguments

use crate::cli::Cli;
use crate::error::{Error, Result};
use dbdoc_core::{
    AssemblerOptions, CommentPolicy, GraphBuilder, MigrationScanner, OutputMode,
    DEFAULT_COLUMN_TITLES, DEFAULT_EXTENSIONS, DEFAULT_NODE_PREFIX, DEFAULT_PLACEHOLDER,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable holding the database password
pub const PASSWORD_ENV: &str = "DBDOC_PASSWORD";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Database connection defaults
    pub connection: ConnectionConfig,

    /// Document rendering settings
    pub render: RenderConfig,

    /// Migration scanning settings
    pub migration: MigrationConfig,
}

/// Database connection defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    /// Database (schema) name
    pub name: String,
}

/// Document rendering settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Comment shown in Markdown when a table has none
    pub placeholder: String,

    /// Comment shown in graph titles when a table has none
    pub graph_placeholder: String,

    /// Prefix of graph node identifiers
    pub node_prefix: String,

    /// Headings of the Markdown column table
    pub column_titles: Vec<String>,
}

/// Migration scanning settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MigrationConfig {
    /// File extensions (without dot) treated as migration files
    pub extensions: Vec<String>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3306,
            user: "root".to_string(),
            name: "test".to_string(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            graph_placeholder: String::new(),
            node_prefix: DEFAULT_NODE_PREFIX.to_string(),
            column_titles: DEFAULT_COLUMN_TITLES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Config = match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            _ => serde_json::from_str(&content)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in &Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable config file");
                    }
                }
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            Self::from_file(path)
        } else {
            Self::load()
        }
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".dbdoc.yaml"),
            PathBuf::from(".dbdoc.json"),
            PathBuf::from("dbdoc.yaml"),
            PathBuf::from("dbdoc.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            let dbdoc_dir = config_dir.join("dbdoc");
            paths.push(dbdoc_dir.join("config.yaml"));
            paths.push(dbdoc_dir.join("config.json"));
        }

        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".dbdoc.yaml"));
            paths.push(home_dir.join(".dbdoc.json"));
        }

        paths
    }

    /// Reject settings that would make every run fail
    pub fn validate(&self) -> Result<()> {
        if self.render.column_titles.is_empty() {
            return Err(Error::config("render.column_titles must not be empty"));
        }
        if self.migration.extensions.iter().all(|e| e.trim().is_empty()) {
            return Err(Error::config("migration.extensions must name at least one extension"));
        }
        Ok(())
    }

    /// Apply command-line values, which already include environment overrides
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(host) = &cli.host {
            self.connection.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.connection.port = port;
        }
        if let Some(user) = &cli.user {
            self.connection.user = user.clone();
        }
        if let Some(name) = &cli.name {
            self.connection.name = name.clone();
        }
    }

    /// Rendering options for the selected output mode
    pub fn assembler_options(&self, mode: OutputMode) -> AssemblerOptions {
        AssemblerOptions {
            mode,
            markdown_policy: CommentPolicy::with_placeholder(&self.render.placeholder),
            graph_policy: CommentPolicy::with_placeholder(&self.render.graph_placeholder),
            column_titles: self.render.column_titles.clone(),
            graph: GraphBuilder::with_node_prefix(&self.render.node_prefix),
        }
    }

    /// Scanner for the configured migration extensions
    pub fn migration_scanner(&self) -> MigrationScanner {
        MigrationScanner::with_extensions(self.migration.extensions.iter().cloned())
    }

    /// Connection parameters for a live database
    #[cfg(feature = "mysql")]
    pub fn connection_params(&self, password: String) -> dbdoc_core::ConnectionParams {
        dbdoc_core::ConnectionParams {
            host: self.connection.host.clone(),
            port: self.connection.port,
            user: self.connection.user.clone(),
            password,
            database: self.connection.name.clone(),
        }
    }
}
