//! Error types for the dbdoc core library
//!
//! Every failure aborts the whole documentation run, so the variants only need
//! to be precise enough for the CLI to pick a message and an exit code.

use std::path::PathBuf;
use thiserror::Error;

/// Boxed source error carried by provider failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for dbdoc operations
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed builder input (empty titles/rows, bad heading level, empty labels)
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The output file already exists and overwriting was not requested
    #[error("{} already exists (use --force to overwrite)", path.display())]
    DestinationExists { path: PathBuf },

    /// Migration root does not exist or is not a directory
    #[error("Invalid migration path: {}", path.display())]
    InvalidPath { path: PathBuf },

    /// Migration root contains no files of a recognized format
    #[error("No migration files to process under {}", path.display())]
    NoFilesToProcess { path: PathBuf },

    /// Introspection provider failure (connection, query, unknown table)
    #[error("Provider error: {message}")]
    Provider {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Snapshot could not be encoded or decoded
    #[error("Snapshot error: {message}")]
    Snapshot {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a provider error without an underlying source
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
            source: None,
        }
    }

    /// Create a provider error wrapping the failure that caused it
    pub fn provider_with_source(
        message: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::Provider {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "invalid_argument",
            Self::DestinationExists { .. } => "destination_exists",
            Self::InvalidPath { .. } => "invalid_path",
            Self::NoFilesToProcess { .. } => "no_files_to_process",
            Self::Provider { .. } => "provider",
            Self::Snapshot { .. } => "snapshot",
            Self::Io(_) => "io",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_argument("titles must not be empty");
        assert_eq!(err.to_string(), "Invalid argument: titles must not be empty");

        let err = Error::DestinationExists {
            path: PathBuf::from("docs/db.md"),
        };
        assert_eq!(
            err.to_string(),
            "docs/db.md already exists (use --force to overwrite)"
        );
    }

    #[test]
    fn test_provider_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = Error::provider_with_source("connecting to localhost", io);

        assert_eq!(err.kind(), "provider");
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("refused"));
    }
}
