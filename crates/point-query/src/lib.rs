//! Point query orchestration.
//!
//! Ties the two halves of the system together: a [`grid_geometry::GridSpec`]
//! describing where points live, and an [`array_store::ArrayReader`] holding
//! the values. The pipeline validates that the two agree once at dataset
//! open time, then answers "value at (lat, lon)" queries.

pub mod error;
pub mod hint;
pub mod pipeline;

pub use error::{QueryError, Result};
pub use hint::gaussian_type_from_remark;
pub use pipeline::{validate, PointSample, QueryPipeline};
