//! Array store metadata contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

/// The dimension vector an array store must expose.
///
/// Spatial axes come last: `[..., ny, nx]`. Any leading axes (time, level,
/// ensemble member) are opaque to the grid resolver and addressed by stride.
/// Reduced Gaussian arrays are stored as a single spatial row
/// (`ny = 1, nx = total_points`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayStoreMetadata {
    dimensions: Vec<u64>,
}

impl ArrayStoreMetadata {
    /// Wrap a dimension vector, requiring at least the two spatial axes and
    /// no zero-length axis.
    pub fn new(dimensions: Vec<u64>) -> Result<Self> {
        if dimensions.len() < 2 {
            return Err(StoreError::invalid_metadata(format!(
                "array must have at least 2 dimensions, got {dimensions:?}"
            )));
        }
        if dimensions.iter().any(|&d| d == 0) {
            return Err(StoreError::invalid_metadata(format!(
                "array has a zero-length dimension: {dimensions:?}"
            )));
        }
        Ok(Self { dimensions })
    }

    /// The full dimension vector, spatial axes last.
    pub fn dimensions(&self) -> &[u64] {
        &self.dimensions
    }

    /// Trailing spatial row count.
    pub fn spatial_ny(&self) -> u64 {
        self.dimensions[self.dimensions.len() - 2]
    }

    /// Trailing spatial column count.
    pub fn spatial_nx(&self) -> u64 {
        self.dimensions[self.dimensions.len() - 1]
    }

    /// Points per spatial slice.
    pub fn spatial_len(&self) -> u64 {
        self.spatial_ny() * self.spatial_nx()
    }

    /// The leading (non-spatial) axes.
    pub fn leading_dimensions(&self) -> &[u64] {
        &self.dimensions[..self.dimensions.len() - 2]
    }

    /// Total element count across all axes.
    pub fn len(&self) -> u64 {
        self.dimensions.iter().product()
    }

    /// Check if the array holds no elements. Always false once constructed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flat element offset for leading axis indices plus a spatial index.
    ///
    /// `leading` must name one index per leading axis, in order; the spatial
    /// index is the flat offset within one `[ny, nx]` slice.
    pub fn flat_offset(&self, leading: &[u64], spatial_index: u64) -> Result<u64> {
        let lead_dims = self.leading_dimensions();
        if leading.len() != lead_dims.len() {
            return Err(StoreError::read_failed(format!(
                "expected {} leading indices for dimensions {:?}, got {:?}",
                lead_dims.len(),
                self.dimensions,
                leading
            )));
        }
        if spatial_index >= self.spatial_len() {
            return Err(StoreError::read_failed(format!(
                "spatial index {spatial_index} out of range for {} points",
                self.spatial_len()
            )));
        }

        let mut offset = 0u64;
        for (axis, (&idx, &dim)) in leading.iter().zip(lead_dims).enumerate() {
            if idx >= dim {
                return Err(StoreError::read_failed(format!(
                    "index {idx} out of range for axis {axis} (length {dim})"
                )));
            }
            offset = offset * dim + idx;
        }
        Ok(offset * self.spatial_len() + spatial_index)
    }
}

/// Optional descriptive attributes attached to a stored array.
///
/// These are advisory: absent or malformed entries never fail an open, they
/// just stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetAttributes {
    /// Physical units of the stored values (e.g. "K").
    pub units: Option<String>,
    /// Model reference (run) time.
    pub reference_time: Option<DateTime<Utc>>,
    /// Free-form coordinate-reference-system remark. For Gaussian datasets
    /// this may name the grid type when no explicit parameters are supplied.
    pub crs_remark: Option<String>,
}

impl DatasetAttributes {
    /// Parse from a Zarr-style attribute map.
    pub fn from_attributes(attrs: &serde_json::Map<String, serde_json::Value>) -> Self {
        let units = attrs
            .get("units")
            .and_then(|v| v.as_str())
            .map(str::to_string);

        let reference_time = attrs
            .get("reference_time")
            .and_then(|v| v.as_str())
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc));

        let crs_remark = attrs
            .get("crs")
            .and_then(|v| v.as_str())
            .map(str::to_string);

        Self {
            units,
            reference_time,
            crs_remark,
        }
    }
}
