//! Error types for grid construction and index resolution.

use thiserror::Error;

/// Errors that can occur constructing a grid or resolving a coordinate.
#[derive(Error, Debug)]
pub enum GridError {
    /// The query coordinate falls outside the grid's coverage under the
    /// configured wrap policy. Recoverable: "no data at this point".
    #[error("coordinate (lat={lat}, lon={lon}) is outside grid bounds")]
    OutOfBounds { lat: f64, lon: f64 },

    /// A flat index does not address any stored point.
    #[error("index {index} is outside the grid ({total} points)")]
    IndexOutOfBounds { index: u64, total: u64 },

    /// The requested Gaussian grid type is not in the catalog.
    #[error("unsupported Gaussian grid type: {0}")]
    UnsupportedGridType(String),

    /// A grid parameter was invalid at construction time.
    #[error("invalid grid parameter: {0}")]
    InvalidParameter(String),

    /// The grid's point count disagrees with the array store's declared
    /// dimensions. Fatal at dataset-open time.
    #[error(
        "grid expects {expected} spatial points but store dimensions {dimensions:?} provide {actual}"
    )]
    ShapeMismatch {
        expected: u64,
        actual: u64,
        dimensions: Vec<u64>,
    },
}

impl GridError {
    /// Create an InvalidParameter error.
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Create an UnsupportedGridType error.
    pub fn unsupported_grid_type(name: impl Into<String>) -> Self {
        Self::UnsupportedGridType(name.into())
    }

    /// Whether this error is the recoverable off-grid outcome rather than a
    /// construction failure.
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(
            self,
            Self::OutOfBounds { .. } | Self::IndexOutOfBounds { .. }
        )
    }
}

/// Result type for grid geometry operations.
pub type Result<T> = std::result::Result<T, GridError>;
