//! Polymorphic grid specification.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::gaussian::GaussianGrid;
use crate::point::GridPoint;
use crate::regular::RegularGrid;

/// Grid geometry for a stored dataset.
///
/// The storage format does not persist grid geometry, so a `GridSpec` value
/// is supplied explicitly at every call boundary — never held as implicit
/// global state. The same stored array can therefore be validated against
/// multiple candidate geometries.
///
/// Dispatch is an exhaustive match; adding a third grid family is a
/// compile-time-checked, localized change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GridSpec {
    /// Evenly spaced latitude/longitude grid.
    Regular(RegularGrid),
    /// Reduced Gaussian grid.
    Gaussian(GaussianGrid),
}

impl GridSpec {
    /// Total number of stored spatial points.
    pub fn total_points(&self) -> u64 {
        match self {
            GridSpec::Regular(grid) => grid.len(),
            GridSpec::Gaussian(grid) => grid.total_points() as u64,
        }
    }

    /// Resolve a coordinate to the nearest stored grid point.
    pub fn resolve(&self, lat: f64, lon: f64) -> Result<GridPoint> {
        match self {
            GridSpec::Regular(grid) => grid.resolve(lat, lon),
            GridSpec::Gaussian(grid) => grid.resolve(lat, lon),
        }
    }

    /// Coordinates `(lat, lon)` of the stored point at a flat spatial index.
    pub fn coord_of(&self, index: u64) -> Option<(f64, f64)> {
        match self {
            GridSpec::Regular(grid) => {
                let nx = grid.nx() as u64;
                let x = u32::try_from(index % nx).ok()?;
                let y = u32::try_from(index / nx).ok()?;
                grid.coord_of(x, y)
            }
            GridSpec::Gaussian(grid) => grid.coord_of(index),
        }
    }

    /// Check this geometry against an array store's dimension vector.
    ///
    /// Dimensions carry the spatial axes last: `[..., ny, nx]`, with
    /// `ny = 1` for Gaussian grids. A mismatch makes the dataset unusable
    /// with this geometry and must abort opening — values would silently
    /// come from the wrong points otherwise.
    pub fn validate_dimensions(&self, dimensions: &[u64]) -> Result<()> {
        if dimensions.len() < 2 {
            return Err(GridError::invalid_parameter(format!(
                "expected at least 2 array dimensions, got {dimensions:?}"
            )));
        }

        let ny = dimensions[dimensions.len() - 2];
        let nx = dimensions[dimensions.len() - 1];
        let (expected_ny, expected_nx) = match self {
            GridSpec::Regular(grid) => (grid.ny() as u64, grid.nx() as u64),
            GridSpec::Gaussian(grid) => (1, grid.total_points() as u64),
        };

        if ny != expected_ny || nx != expected_nx {
            return Err(GridError::ShapeMismatch {
                expected: expected_ny * expected_nx,
                actual: ny * nx,
                dimensions: dimensions.to_vec(),
            });
        }
        Ok(())
    }
}

impl From<RegularGrid> for GridSpec {
    fn from(grid: RegularGrid) -> Self {
        GridSpec::Regular(grid)
    }
}

impl From<GaussianGrid> for GridSpec {
    fn from(grid: GaussianGrid) -> Self {
        GridSpec::Gaussian(grid)
    }
}
