//! Common error types for Kuchařka

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for Kuchařka operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the server and the front end
#[derive(Error, Debug)]
pub enum Error {
    /// Storage file missing or unparsable.
    ///
    /// Both causes collapse into this one variant; the distinction is only logged.
    #[error("Unable to read from storage. {}", .0.display())]
    StorageRead(PathBuf),

    /// Writing, renaming or locking the storage file failed
    #[error("Unable to write to storage. {}: {source}", path.display())]
    StorageWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Entity clashes with one already stored
    #[error("Conflict: {0}")]
    Conflict(String),
}

impl Error {
    /// Stable machine-readable code used in API error bodies
    pub fn code(&self) -> &'static str {
        match self {
            Error::StorageRead(_) => "storage_read_failed",
            Error::StorageWrite { .. } => "storage_write_failed",
            Error::Io(_) => "io_error",
            Error::Json(_) => "json_error",
            Error::Config(_) => "config_error",
            Error::NotFound(_) => "not_found",
            Error::InvalidInput(_) => "invalid_input",
            Error::Conflict(_) => "conflict",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_read_message_names_path() {
        let err = Error::StorageRead(PathBuf::from("/data/recipes.json"));
        assert_eq!(
            err.to_string(),
            "Unable to read from storage. /data/recipes.json"
        );
        assert_eq!(err.code(), "storage_read_failed");
    }

    #[test]
    fn test_storage_write_keeps_source() {
        let err = Error::StorageWrite {
            path: PathBuf::from("/data/recipes.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("denied"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
