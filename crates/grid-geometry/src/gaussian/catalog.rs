//! Named catalog of supported Gaussian grid types.
//!
//! The storage format never persists Gaussian geometry, so this catalog is
//! the authoritative geometry source. The octahedral ('O') family follows
//! the ECMWF closed form: row `y` of the northern hemisphere holds
//! `20 + 4y` points, mirrored on the southern hemisphere, for a total of
//! `4 * L * (L + 9)` points over `2L` rows. Adding a grid type is a catalog
//! edit, not a structural change.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// Catalog key for a supported reduced Gaussian grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GaussianGridType {
    /// ECMWF octahedral O320 (seasonal forecast products).
    O320,
    /// ECMWF octahedral O640.
    O640,
    /// ECMWF octahedral O1280 (IFS high resolution).
    O1280,
}

impl GaussianGridType {
    /// Number of latitude lines per hemisphere (`L`).
    pub fn latitude_lines(&self) -> u32 {
        match self {
            Self::O320 => 320,
            Self::O640 => 640,
            Self::O1280 => 1280,
        }
    }

    /// Total number of rows across both hemispheres.
    pub fn num_rows(&self) -> u32 {
        2 * self.latitude_lines()
    }

    /// Total number of stored points: `4 * L * (L + 9)`.
    pub fn total_points(&self) -> u32 {
        let l = self.latitude_lines();
        4 * l * (l + 9)
    }

    /// Latitude spacing between adjacent rows, in degrees.
    pub fn row_spacing(&self) -> f64 {
        180.0 / (2.0 * self.latitude_lines() as f64 + 0.5)
    }

    /// Number of longitude points on row `y`. Row 0 is the northernmost.
    pub fn row_length(&self, y: u32) -> u32 {
        let l = self.latitude_lines();
        debug_assert!(y < 2 * l);
        if y < l {
            20 + 4 * y
        } else {
            20 + 4 * (2 * l - y - 1)
        }
    }

    /// Center latitude of row `y`, in degrees. Strictly decreasing in `y`.
    pub fn row_latitude(&self, y: u32) -> f64 {
        let l = self.latitude_lines() as f64;
        let dy = self.row_spacing();
        (l - y as f64 - 1.0) * dy + dy / 2.0
    }

    /// Parse a catalog token (case-insensitive, surrounding whitespace
    /// ignored). Unknown tokens fail with `UnsupportedGridType` — geometry
    /// is never guessed.
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "o320" => Ok(Self::O320),
            "o640" => Ok(Self::O640),
            "o1280" => Ok(Self::O1280),
            other => Err(GridError::unsupported_grid_type(other)),
        }
    }

    /// Catalog token for this grid type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::O320 => "o320",
            Self::O640 => "o640",
            Self::O1280 => "o1280",
        }
    }
}

impl fmt::Display for GaussianGridType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GaussianGridType {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_points_closed_form() {
        assert_eq!(GaussianGridType::O320.total_points(), 421_120);
        assert_eq!(GaussianGridType::O640.total_points(), 1_661_440);
        assert_eq!(GaussianGridType::O1280.total_points(), 6_599_680);
    }

    #[test]
    fn test_row_lengths_mirror_at_equator() {
        for grid_type in [
            GaussianGridType::O320,
            GaussianGridType::O640,
            GaussianGridType::O1280,
        ] {
            let rows = grid_type.num_rows();
            assert_eq!(grid_type.row_length(0), 20);
            assert_eq!(grid_type.row_length(rows - 1), 20);
            for y in 0..rows {
                assert_eq!(
                    grid_type.row_length(y),
                    grid_type.row_length(rows - 1 - y),
                    "row {y} not mirrored"
                );
            }
        }
    }

    #[test]
    fn test_row_latitudes_strictly_decreasing_and_symmetric() {
        let grid_type = GaussianGridType::O320;
        let rows = grid_type.num_rows();
        for y in 1..rows {
            assert!(grid_type.row_latitude(y) < grid_type.row_latitude(y - 1));
        }
        // Hemispheres mirror around the equator.
        for y in 0..rows {
            let north = grid_type.row_latitude(y);
            let south = grid_type.row_latitude(rows - 1 - y);
            assert!((north + south).abs() < 1e-9);
        }
        assert!(grid_type.row_latitude(0) < 90.0);
        assert!(grid_type.row_latitude(rows - 1) > -90.0);
    }

    #[test]
    fn test_parse_tokens() {
        assert_eq!(
            GaussianGridType::parse("o1280").unwrap(),
            GaussianGridType::O1280
        );
        assert_eq!(
            GaussianGridType::parse(" O320 ").unwrap(),
            GaussianGridType::O320
        );
        assert_eq!(
            "o640".parse::<GaussianGridType>().unwrap(),
            GaussianGridType::O640
        );
        assert!(matches!(
            GaussianGridType::parse("n160"),
            Err(GridError::UnsupportedGridType(_))
        ));
        assert!(matches!(
            GaussianGridType::parse("regular"),
            Err(GridError::UnsupportedGridType(_))
        ));
    }
}
