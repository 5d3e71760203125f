//! Reduced Gaussian grid resolution.
//!
//! Each latitude row has its own longitude count, and longitudes within a
//! row are evenly spaced over the full 360-degree circle with no meridian
//! offset. Reduced Gaussian grids are always globally periodic in
//! longitude, so the 0/360 seam wraps automatically.

mod catalog;
mod row_index;

pub use catalog::GaussianGridType;
pub use row_index::GaussianRowIndex;

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::point::{round_half_away, GridPoint};

/// A reduced Gaussian grid with its precomputed row index.
///
/// Immutable after construction; share it read-only across concurrent
/// queries against the dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaussianGrid {
    grid_type: Option<GaussianGridType>,
    rows: GaussianRowIndex,
}

impl GaussianGrid {
    /// Build the grid for a named catalog type.
    ///
    /// The row index is computed here, once per dataset, and reused by
    /// every subsequent query.
    pub fn new(grid_type: GaussianGridType) -> Self {
        Self {
            grid_type: Some(grid_type),
            rows: GaussianRowIndex::from_catalog(grid_type),
        }
    }

    /// Build a grid from an explicit `(latitude, row_length)` table.
    pub fn from_rows(rows: &[(f64, u32)]) -> Result<Self> {
        Ok(Self {
            grid_type: None,
            rows: GaussianRowIndex::from_rows(rows)?,
        })
    }

    /// Catalog type, if this grid came from the catalog.
    pub fn grid_type(&self) -> Option<GaussianGridType> {
        self.grid_type
    }

    /// Per-row geometry.
    pub fn rows(&self) -> &GaussianRowIndex {
        &self.rows
    }

    /// Total number of stored points.
    pub fn total_points(&self) -> u32 {
        self.rows.total_points()
    }

    /// Resolve a coordinate to the nearest stored grid point.
    pub fn resolve(&self, lat: f64, lon: f64) -> Result<GridPoint> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(GridError::OutOfBounds { lat, lon });
        }

        let y = self
            .rows
            .nearest_row(lat)
            .ok_or(GridError::OutOfBounds { lat, lon })?;

        let n = self.rows.row_length(y);
        let lon_norm = lon.rem_euclid(360.0);
        let x_raw = lon_norm * n as f64 / 360.0;
        // Rounding can land on n at the seam; the modulo wraps it to 0.
        let x = round_half_away(x_raw).rem_euclid(n as i64) as u32;

        Ok(GridPoint {
            index: self.rows.row_offset(y) as u64 + x as u64,
            x,
            y: y as u32,
        })
    }

    /// Coordinates `(lat, lon)` of the stored point at a flat index.
    pub fn coord_of(&self, index: u64) -> Option<(f64, f64)> {
        let index = u32::try_from(index).ok()?;
        let y = self.rows.row_of_index(index)?;
        let x = index - self.rows.row_offset(y);
        let lon = x as f64 * 360.0 / self.rows.row_length(y) as f64;
        Some((self.rows.latitude(y), lon))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seam_wraps_to_zero() {
        // x_raw = 359.9 * 8 / 360 = 7.997... rounds to 8, mod 8 = 0.
        let grid = GaussianGrid::from_rows(&[(10.0, 8), (-10.0, 12)]).unwrap();
        let point = grid.resolve(10.0, 359.9).unwrap();
        assert_eq!(point.x, 0);
        assert_eq!(point.y, 0);
        assert_eq!(point.index, 0);
    }

    #[test]
    fn test_negative_longitude_normalized() {
        let grid = GaussianGrid::from_rows(&[(10.0, 8), (-10.0, 12)]).unwrap();
        // -90 normalizes to 270, x_raw = 270 * 8 / 360 = 6.
        let point = grid.resolve(10.0, -90.0).unwrap();
        assert_eq!(point.x, 6);
        // Second row has its own spacing: 270 * 12 / 360 = 9.
        let point = grid.resolve(-10.0, -90.0).unwrap();
        assert_eq!(point.x, 9);
        assert_eq!(point.index, 8 + 9);
    }

    #[test]
    fn test_round_trip_small_grid() {
        let grid =
            GaussianGrid::from_rows(&[(45.0, 4), (15.0, 8), (-15.0, 8), (-45.0, 4)]).unwrap();
        for index in 0..grid.total_points() as u64 {
            let (lat, lon) = grid.coord_of(index).unwrap();
            let point = grid.resolve(lat, lon).unwrap();
            assert_eq!(point.index, index, "index {index} did not round-trip");
        }
        assert!(grid.coord_of(grid.total_points() as u64).is_none());
    }

    #[test]
    fn test_round_trip_o320_sampled() {
        let grid = GaussianGrid::new(GaussianGridType::O320);
        let rows = grid.rows();
        for y in 0..rows.num_rows() {
            let n = rows.row_length(y);
            for x in [0, n / 2, n - 1] {
                let index = rows.row_offset(y) as u64 + x as u64;
                let (lat, lon) = grid.coord_of(index).unwrap();
                let point = grid.resolve(lat, lon).unwrap();
                assert_eq!(point.index, index);
                assert_eq!(point.x, x);
                assert_eq!(point.y, y as u32);
            }
        }
    }

    #[test]
    fn test_polar_queries_clamp_within_margin() {
        let grid = GaussianGrid::new(GaussianGridType::O320);
        // The first row sits at ~89.80N with ~0.281 degree spacing, so
        // 89.9 clamps to row 0 while the pole itself is out of coverage.
        let point = grid.resolve(89.9, 0.0).unwrap();
        assert_eq!(point.y, 0);
        assert!(matches!(
            grid.resolve(90.0, 0.0),
            Err(GridError::OutOfBounds { .. })
        ));
        assert!(matches!(
            grid.resolve(-90.0, 0.0),
            Err(GridError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_catalog_grid_total_points() {
        let grid = GaussianGrid::new(GaussianGridType::O1280);
        assert_eq!(grid.total_points(), 6_599_680);
        assert_eq!(grid.grid_type(), Some(GaussianGridType::O1280));
        assert_eq!(grid.rows().num_rows(), 2560);
    }
}
