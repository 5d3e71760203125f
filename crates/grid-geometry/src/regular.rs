//! Regular latitude/longitude grid resolution.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::point::{round_half_away, GridPoint};

/// How out-of-range coordinates are folded back onto the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WrapPolicy {
    /// No wrapping: coordinates outside the grid fail with `OutOfBounds`.
    #[default]
    None,
    /// Wrap the longitude axis with true modulo; latitude is still
    /// bounds-checked. For global grids periodic in longitude.
    Longitude,
    /// Wrap both axes. For grids whose stored array is understood to tile
    /// periodically.
    Both,
}

impl WrapPolicy {
    /// Parse from string (case-insensitive). Unrecognized values fall back
    /// to `None`.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "longitude" | "lon" => Self::Longitude,
            "both" => Self::Both,
            _ => Self::None,
        }
    }
}

/// An evenly spaced latitude/longitude grid.
///
/// Stored row-major with `y` varying slowest: `index = y * nx + x`, where
/// row 0 is at `lat_min` and column 0 at `lon_min`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegularGrid {
    nx: u32,
    ny: u32,
    lat_min: f64,
    lon_min: f64,
    dx: f64,
    dy: f64,
    wrap: WrapPolicy,
}

impl RegularGrid {
    /// Create a new regular grid.
    ///
    /// Fails with `InvalidParameter` when a dimension is zero or a spacing
    /// is not strictly positive.
    pub fn new(
        nx: u32,
        ny: u32,
        lat_min: f64,
        lon_min: f64,
        dx: f64,
        dy: f64,
        wrap: WrapPolicy,
    ) -> Result<Self> {
        if nx == 0 || ny == 0 {
            return Err(GridError::invalid_parameter(format!(
                "grid dimensions must be positive: nx={nx} ny={ny}"
            )));
        }
        if !(dx > 0.0) || !(dy > 0.0) {
            return Err(GridError::invalid_parameter(format!(
                "grid spacing must be positive: dx={dx} dy={dy}"
            )));
        }
        Ok(Self {
            nx,
            ny,
            lat_min,
            lon_min,
            dx,
            dy,
            wrap,
        })
    }

    /// Number of points in X (longitude) direction.
    pub fn nx(&self) -> u32 {
        self.nx
    }

    /// Number of points in Y (latitude) direction.
    pub fn ny(&self) -> u32 {
        self.ny
    }

    /// First grid point latitude.
    pub fn lat_min(&self) -> f64 {
        self.lat_min
    }

    /// First grid point longitude.
    pub fn lon_min(&self) -> f64 {
        self.lon_min
    }

    /// Grid spacing in longitude (degrees).
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Grid spacing in latitude (degrees).
    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// Wrap policy for out-of-range coordinates.
    pub fn wrap(&self) -> WrapPolicy {
        self.wrap
    }

    /// Last grid point latitude. Derived, never stored.
    pub fn lat_max(&self) -> f64 {
        self.lat_min + self.dy * (self.ny - 1) as f64
    }

    /// Last grid point longitude. Derived, never stored.
    pub fn lon_max(&self) -> f64 {
        self.lon_min + self.dx * (self.nx - 1) as f64
    }

    /// Total number of stored points.
    pub fn len(&self) -> u64 {
        self.nx as u64 * self.ny as u64
    }

    /// Check if grid is empty. Always false for a constructed grid.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve a coordinate to the nearest stored grid point.
    ///
    /// Fractional grid coordinates are rounded half away from zero, then
    /// wrapped or bounds-checked per the grid's [`WrapPolicy`].
    pub fn resolve(&self, lat: f64, lon: f64) -> Result<GridPoint> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(GridError::OutOfBounds { lat, lon });
        }

        let x_raw = (lon - self.lon_min) / self.dx;
        let y_raw = (lat - self.lat_min) / self.dy;
        let mut x = round_half_away(x_raw);
        let mut y = round_half_away(y_raw);

        let nx = self.nx as i64;
        let ny = self.ny as i64;

        match self.wrap {
            WrapPolicy::None => {}
            WrapPolicy::Longitude => x = x.rem_euclid(nx),
            WrapPolicy::Both => {
                x = x.rem_euclid(nx);
                y = y.rem_euclid(ny);
            }
        }

        if x < 0 || x >= nx || y < 0 || y >= ny {
            return Err(GridError::OutOfBounds { lat, lon });
        }

        let (x, y) = (x as u32, y as u32);
        Ok(GridPoint {
            index: y as u64 * self.nx as u64 + x as u64,
            x,
            y,
        })
    }

    /// Coordinates `(lat, lon)` of the stored point at integer grid indices.
    ///
    /// Exact inverse of `resolve` only at stored points; arbitrary query
    /// inputs are lossy by design (nearest-point semantics).
    pub fn coord_of(&self, x: u32, y: u32) -> Option<(f64, f64)> {
        if x >= self.nx || y >= self.ny {
            return None;
        }
        Some((
            self.lat_min + y as f64 * self.dy,
            self.lon_min + x as f64 * self.dx,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_grid(nx: u32, ny: u32, wrap: WrapPolicy) -> RegularGrid {
        RegularGrid::new(nx, ny, 0.0, 0.0, 1.0, 1.0, wrap).unwrap()
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        assert!(matches!(
            RegularGrid::new(0, 10, 0.0, 0.0, 1.0, 1.0, WrapPolicy::None),
            Err(GridError::InvalidParameter(_))
        ));
        assert!(matches!(
            RegularGrid::new(10, 0, 0.0, 0.0, 1.0, 1.0, WrapPolicy::None),
            Err(GridError::InvalidParameter(_))
        ));
        assert!(matches!(
            RegularGrid::new(10, 10, 0.0, 0.0, -0.5, 1.0, WrapPolicy::None),
            Err(GridError::InvalidParameter(_))
        ));
        assert!(matches!(
            RegularGrid::new(10, 10, 0.0, 0.0, 1.0, 0.0, WrapPolicy::None),
            Err(GridError::InvalidParameter(_))
        ));
        assert!(matches!(
            RegularGrid::new(10, 10, 0.0, 0.0, 1.0, f64::NAN, WrapPolicy::None),
            Err(GridError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_derived_bounds() {
        let grid = RegularGrid::new(1440, 721, -90.0, -180.0, 0.25, 0.25, WrapPolicy::None)
            .unwrap();
        assert!((grid.lat_max() - 90.0).abs() < 1e-9);
        assert!((grid.lon_max() - 179.75).abs() < 1e-9);
        assert_eq!(grid.len(), 1440 * 721);
    }

    #[test]
    fn test_rounding_pin_half_away_from_zero() {
        // lon = 0.5 sits exactly between columns 0 and 1 and must round to 1.
        let grid = unit_grid(4, 4, WrapPolicy::None);
        let point = grid.resolve(0.0, 0.5).unwrap();
        assert_eq!(point.x, 1);
        assert_eq!(point.y, 0);
        assert_eq!(point.index, 1);
    }

    #[test]
    fn test_wrap_pin_negative_longitude() {
        // x_raw = -0.6 rounds to -1, then wraps to nx - 1 = 1.
        let grid = RegularGrid::new(2, 1, 0.0, -1.0, 1.0, 1.0, WrapPolicy::Longitude).unwrap();
        let point = grid.resolve(0.0, -1.6).unwrap();
        assert_eq!(point.x, 1);
        assert_eq!(point.y, 0);
        assert_eq!(point.index, 1);
    }

    #[test]
    fn test_out_of_bounds_without_wrap() {
        let grid = unit_grid(4, 4, WrapPolicy::None);
        assert!(matches!(
            grid.resolve(0.0, 4.2),
            Err(GridError::OutOfBounds { .. })
        ));
        assert!(matches!(
            grid.resolve(-1.0, 0.0),
            Err(GridError::OutOfBounds { .. })
        ));
        assert!(matches!(
            grid.resolve(f64::NAN, 0.0),
            Err(GridError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_wrap_longitude_keeps_latitude_checked() {
        let grid = unit_grid(4, 4, WrapPolicy::Longitude);
        let point = grid.resolve(0.0, 5.0).unwrap();
        assert_eq!(point.x, 1);
        assert!(matches!(
            grid.resolve(7.0, 0.0),
            Err(GridError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_wrap_both_tiles_periodically() {
        let grid = unit_grid(4, 3, WrapPolicy::Both);
        let point = grid.resolve(-1.0, -1.0).unwrap();
        assert_eq!(point.x, 3);
        assert_eq!(point.y, 2);
        assert_eq!(point.index, 2 * 4 + 3);
    }

    #[test]
    fn test_round_trip_at_exact_grid_points() {
        let grid = RegularGrid::new(5, 4, -10.0, 100.0, 0.5, 0.25, WrapPolicy::None).unwrap();
        for y in 0..4u32 {
            for x in 0..5u32 {
                let (lat, lon) = grid.coord_of(x, y).unwrap();
                let point = grid.resolve(lat, lon).unwrap();
                assert_eq!(point.x, x);
                assert_eq!(point.y, y);
                assert_eq!(point.index, y as u64 * 5 + x as u64);
            }
        }
        assert!(grid.coord_of(5, 0).is_none());
        assert!(grid.coord_of(0, 4).is_none());
    }

    #[test]
    fn test_era5_berlin_end_to_end() {
        // ERA5-shaped global grid, queried at Berlin.
        let grid = RegularGrid::new(1440, 721, -90.0, -180.0, 0.25, 0.25, WrapPolicy::None)
            .unwrap();
        let point = grid.resolve(52.52, 13.41).unwrap();
        assert_eq!(point.x, 774); // (13.41 + 180) / 0.25 = 773.64
        assert_eq!(point.y, 570); // (52.52 + 90) / 0.25 = 570.08
        assert_eq!(point.index, 570 * 1440 + 774);
    }

    #[test]
    fn test_wrap_policy_from_str() {
        assert_eq!(WrapPolicy::from_str("longitude"), WrapPolicy::Longitude);
        assert_eq!(WrapPolicy::from_str("LON"), WrapPolicy::Longitude);
        assert_eq!(WrapPolicy::from_str("both"), WrapPolicy::Both);
        assert_eq!(WrapPolicy::from_str("none"), WrapPolicy::None);
        assert_eq!(WrapPolicy::from_str("invalid"), WrapPolicy::None);
    }
}
