//! Errors raised while reading or writing stored values.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to {operation} {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Key contains characters that cannot be stored.
    #[error("Invalid storage key: {key:?}")]
    InvalidKey { key: String },

    #[error("Failed to serialize value for '{key}'")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Stored value could not be decoded.
    #[error("Failed to deserialize value stored under '{key}'")]
    Deserialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The temp file was written but could not replace the target.
    #[error("Failed to complete write of {target_path}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PersistenceError {
    /// Message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} {}", operation, path.display())
            }
            Self::InvalidKey { key } => {
                format!("'{key}' cannot be used as a storage key")
            }
            Self::Serialization { .. } => "An error occurred while saving your data.".to_string(),
            Self::Deserialization { key, .. } => {
                format!("The saved data for '{key}' could not be read. It may be corrupted.")
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not save to {}. Please check disk space and permissions.",
                    target_path.display()
                )
            }
        }
    }

    /// What the user can do about it, when there is anything.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation: "read", .. } => {
                Some("Check that the data directory is readable.".into())
            }
            Self::Io { .. } => Some("Check that the data directory is writable.".into()),
            Self::InvalidKey { .. } | Self::Serialization { .. } => None,
            Self::Deserialization { .. } => {
                Some("Remove the damaged file from the data directory to start fresh.".into())
            }
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or choose a different data directory.".into())
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, PersistenceError>;
