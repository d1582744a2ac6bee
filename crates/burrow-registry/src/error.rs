use std::path::PathBuf;
use thiserror::Error;

/// Result type for registry persistence operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("snapshot {} could not be accessed: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("snapshot {} is malformed: {source}", .path.display())]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("registry could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("background save task failed: {0}")]
    Background(String),
}

impl RegistryError {
    /// Returns true when the snapshot source simply does not exist yet,
    /// as opposed to existing but being unreadable or corrupt.
    pub fn is_missing_source(&self) -> bool {
        matches!(
            self,
            RegistryError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}
