//! Error type for point query orchestration.

use thiserror::Error;

/// Errors surfaced by the query pipeline.
#[derive(Error, Debug)]
pub enum QueryError {
    /// Grid construction, validation or resolution failed.
    #[error(transparent)]
    Grid(#[from] grid_geometry::GridError),

    /// The array store collaborator failed.
    #[error(transparent)]
    Store(#[from] array_store::StoreError),
}

impl QueryError {
    /// Whether this is the recoverable off-grid outcome ("no data at this
    /// point") rather than a dataset or store failure.
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, Self::Grid(err) if err.is_out_of_bounds())
    }
}

/// Result type for point query operations.
pub type Result<T> = std::result::Result<T, QueryError>;
