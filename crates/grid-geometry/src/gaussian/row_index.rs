//! Precomputed per-row geometry for reduced Gaussian grids.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::gaussian::GaussianGridType;

/// Per-row longitude counts and prefix-sum offsets for a Gaussian grid.
///
/// Row 0 is the northernmost row and latitudes decrease strictly with the
/// row index; this monotonicity is what makes row location a binary search.
/// `row_offsets[y]` is the flat index of the first point in row `y`, so
/// `row_offsets[0] == 0` and `total_points == row_offsets[last] +
/// row_lengths[last]`.
///
/// Built once when a dataset's grid type is known and reused by every
/// subsequent query; without the precomputed offsets each reverse lookup
/// would rescan the row table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaussianRowIndex {
    latitudes: Vec<f64>,
    row_lengths: Vec<u32>,
    row_offsets: Vec<u32>,
    total_points: u32,
}

impl GaussianRowIndex {
    /// Build the row index for a catalog grid type in one pass.
    pub fn from_catalog(grid_type: GaussianGridType) -> Self {
        let rows = grid_type.num_rows();
        let mut latitudes = Vec::with_capacity(rows as usize);
        let mut row_lengths = Vec::with_capacity(rows as usize);
        let mut row_offsets = Vec::with_capacity(rows as usize);
        let mut offset = 0u32;

        for y in 0..rows {
            let length = grid_type.row_length(y);
            latitudes.push(grid_type.row_latitude(y));
            row_lengths.push(length);
            row_offsets.push(offset);
            offset += length;
        }

        debug_assert_eq!(offset, grid_type.total_points());
        Self {
            latitudes,
            row_lengths,
            row_offsets,
            total_points: offset,
        }
    }

    /// Build a row index from explicit `(latitude, row_length)` rows.
    ///
    /// Requires at least two rows, strictly decreasing latitudes and
    /// non-zero row lengths; fails with `InvalidParameter` otherwise.
    pub fn from_rows(rows: &[(f64, u32)]) -> Result<Self> {
        if rows.len() < 2 {
            return Err(GridError::invalid_parameter(format!(
                "a Gaussian grid needs at least two rows, got {}",
                rows.len()
            )));
        }

        let mut latitudes = Vec::with_capacity(rows.len());
        let mut row_lengths = Vec::with_capacity(rows.len());
        let mut row_offsets = Vec::with_capacity(rows.len());
        let mut offset = 0u32;

        for (y, &(lat, length)) in rows.iter().enumerate() {
            if !lat.is_finite() {
                return Err(GridError::invalid_parameter(format!(
                    "row {y} latitude is not finite"
                )));
            }
            if y > 0 && lat >= latitudes[y - 1] {
                return Err(GridError::invalid_parameter(format!(
                    "row latitudes must decrease strictly: row {y} ({lat}) \
                     does not descend from {}",
                    latitudes[y - 1]
                )));
            }
            if length == 0 {
                return Err(GridError::invalid_parameter(format!(
                    "row {y} has zero points"
                )));
            }

            latitudes.push(lat);
            row_lengths.push(length);
            row_offsets.push(offset);
            offset = offset.checked_add(length).ok_or_else(|| {
                GridError::invalid_parameter("total point count overflows u32")
            })?;
        }

        Ok(Self {
            latitudes,
            row_lengths,
            row_offsets,
            total_points: offset,
        })
    }

    /// Number of latitude rows.
    pub fn num_rows(&self) -> usize {
        self.latitudes.len()
    }

    /// Center latitude of row `y`.
    pub fn latitude(&self, y: usize) -> f64 {
        self.latitudes[y]
    }

    /// Number of longitude points on row `y`.
    pub fn row_length(&self, y: usize) -> u32 {
        self.row_lengths[y]
    }

    /// Flat index of the first point in row `y`.
    pub fn row_offset(&self, y: usize) -> u32 {
        self.row_offsets[y]
    }

    /// Total number of stored points.
    pub fn total_points(&self) -> u32 {
        self.total_points
    }

    /// Row whose center latitude is nearest `lat`, located by binary search
    /// over the descending latitude table.
    ///
    /// Exact ties break toward the smaller row index (the pole listed first
    /// in the table). Returns `None` when `lat` lies more than half the
    /// adjacent row spacing beyond the first or last row.
    pub fn nearest_row(&self, lat: f64) -> Option<usize> {
        let lats = &self.latitudes;
        let n = lats.len();

        let north_margin = (lats[0] - lats[1]) / 2.0;
        if lat > lats[0] + north_margin {
            return None;
        }
        let south_margin = (lats[n - 2] - lats[n - 1]) / 2.0;
        if lat < lats[n - 1] - south_margin {
            return None;
        }

        // First row at or below the query latitude.
        let i = lats.partition_point(|&row_lat| row_lat > lat);
        if i == 0 {
            return Some(0);
        }
        if i == n {
            return Some(n - 1);
        }

        let to_north = lats[i - 1] - lat;
        let to_south = lat - lats[i];
        if to_north <= to_south {
            Some(i - 1)
        } else {
            Some(i)
        }
    }

    /// Row containing a flat index: the largest offset `<= index`.
    pub fn row_of_index(&self, index: u32) -> Option<usize> {
        if index >= self.total_points {
            return None;
        }
        // row_offsets[0] == 0, so the partition point is always >= 1.
        Some(self.row_offsets.partition_point(|&off| off <= index) - 1)
    }
}
