//! Grid geometry and spatial index resolution for stored weather arrays.
//!
//! The storage format holds flat, chunked arrays and deliberately does not
//! encode grid geometry. This crate reconstructs that geometry and provides
//! the bidirectional mapping between geographic coordinates and flat storage
//! indices for two structurally different grid families:
//!
//! - **Regular latitude/longitude grids**: evenly spaced rectangular grids
//!   addressed as `index = y * nx + x`.
//! - **Reduced Gaussian grids**: one longitude count per latitude row, with
//!   a precomputed prefix-sum row index for amortized O(1) lookups.
//!
//! Both resolvers answer "nearest stored gridpoint" — the format holds point
//! samples, not a continuous field, so no interpolation is performed here.
//!
//! All operations are synchronous, bounded computation (at worst a binary
//! search over the row table). Constructed grids are immutable and safely
//! shared by reference across any number of concurrent query tasks.

pub mod error;
pub mod gaussian;
pub mod point;
pub mod regular;
pub mod spec;

pub use error::{GridError, Result};
pub use gaussian::{GaussianGrid, GaussianGridType, GaussianRowIndex};
pub use point::GridPoint;
pub use regular::{RegularGrid, WrapPolicy};
pub use spec::GridSpec;
