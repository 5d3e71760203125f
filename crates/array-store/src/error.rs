//! Error types for array store access.

use thiserror::Error;

/// Errors that can occur opening or reading a stored array.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the array.
    #[error("failed to open array: {0}")]
    OpenFailed(String),

    /// Failed to read a value from the array.
    #[error("failed to read array: {0}")]
    ReadFailed(String),

    /// The array's declared metadata is unusable.
    #[error("invalid array metadata: {0}")]
    InvalidMetadata(String),

    /// Zarr format error.
    #[error("Zarr format error: {0}")]
    Zarr(String),
}

impl StoreError {
    /// Create an OpenFailed error.
    pub fn open_failed(msg: impl Into<String>) -> Self {
        Self::OpenFailed(msg.into())
    }

    /// Create a ReadFailed error.
    pub fn read_failed(msg: impl Into<String>) -> Self {
        Self::ReadFailed(msg.into())
    }

    /// Create an InvalidMetadata error.
    pub fn invalid_metadata(msg: impl Into<String>) -> Self {
        Self::InvalidMetadata(msg.into())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::ReadFailed(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidMetadata(err.to_string())
    }
}

/// Result type for array store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
