//! Error types and handling for the CLI
//!
//! Every failure ends the run with a one-line warning and a non-zero exit
//! code that identifies the kind of failure.

use crate::logging::redaction::redact_sensitive;
use std::io;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, password prompt)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error from dbdoc-core library
    #[error("{0}")]
    Core(#[from] dbdoc_core::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON configuration could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML configuration could not be parsed
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic error with context
    #[error("{message}")]
    Other { message: String },
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a generic error with message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::Core(core) => match core {
                dbdoc_core::Error::Io(_) => 1,
                dbdoc_core::Error::InvalidArgument { .. } => 2,
                dbdoc_core::Error::DestinationExists { .. } => 3,
                dbdoc_core::Error::InvalidPath { .. } => 4,
                dbdoc_core::Error::NoFilesToProcess { .. } => 5,
                dbdoc_core::Error::Provider { .. } => 6,
                dbdoc_core::Error::Snapshot { .. } => 7,
            },
            Self::Config(_) => 8,
            Self::Json(_) => 9,
            Self::Yaml(_) => 10,
            Self::Other { .. } => 99,
        }
    }

    /// Short machine-readable name of the error kind, for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Core(core) => core.kind(),
            Self::Config(_) => "config",
            Self::Json(_) => "json",
            Self::Yaml(_) => "yaml",
            Self::Other { .. } => "other",
        }
    }
}

/// Error message followed by every underlying cause not already part of it
fn message_with_causes(error: &Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        let text = cause.to_string();
        if !text.is_empty() && !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Format an error as the single warning line shown to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    let message = redact_sensitive(&message_with_causes(error)).replace(['\r', '\n'], " ");
    if use_color {
        use colored::Colorize;
        format!("{} {}", "Warning:".yellow().bold(), message)
    } else {
        format!("Warning: {}", message)
    }
}
