//! Array reader contract and the in-memory reference store.

use async_trait::async_trait;

use crate::error::{Result, StoreError};
use crate::metadata::{ArrayStoreMetadata, DatasetAttributes};

/// Read access to a stored flat array.
///
/// The grid resolver produces flat spatial indices; implementations own the
/// striding over any leading time/level axes and every byte-level concern
/// (chunking, compression, I/O, timeouts and retries included).
#[async_trait]
pub trait ArrayReader: Send + Sync {
    /// Dimension vector and derived shape information.
    fn metadata(&self) -> &ArrayStoreMetadata;

    /// Descriptive attributes, if the container carries any.
    fn attributes(&self) -> &DatasetAttributes;

    /// Declared fill value marking missing points, if any.
    fn fill_value(&self) -> Option<f32> {
        None
    }

    /// Read one value. `leading` indexes the non-spatial axes in order;
    /// `spatial_index` is the flat offset into the trailing `[ny, nx]` axes.
    async fn read_at(&self, leading: &[u64], spatial_index: u64) -> Result<f32>;
}

/// Array store backed by a plain `Vec<f32>`.
///
/// Layout matches the on-disk convention: leading axes outermost, spatial
/// axes last, row-major throughout.
pub struct InMemoryArrayStore {
    metadata: ArrayStoreMetadata,
    attributes: DatasetAttributes,
    fill_value: Option<f32>,
    data: Vec<f32>,
}

impl InMemoryArrayStore {
    /// Create a store from a dimension vector and matching data.
    pub fn new(dimensions: Vec<u64>, data: Vec<f32>) -> Result<Self> {
        let metadata = ArrayStoreMetadata::new(dimensions)?;
        if metadata.len() != data.len() as u64 {
            return Err(StoreError::invalid_metadata(format!(
                "dimensions {:?} imply {} elements but {} were supplied",
                metadata.dimensions(),
                metadata.len(),
                data.len()
            )));
        }
        Ok(Self {
            metadata,
            attributes: DatasetAttributes::default(),
            fill_value: None,
            data,
        })
    }

    /// Attach descriptive attributes.
    pub fn with_attributes(mut self, attributes: DatasetAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Declare a fill value marking missing points.
    pub fn with_fill_value(mut self, fill_value: f32) -> Self {
        self.fill_value = Some(fill_value);
        self
    }
}

#[async_trait]
impl ArrayReader for InMemoryArrayStore {
    fn metadata(&self) -> &ArrayStoreMetadata {
        &self.metadata
    }

    fn attributes(&self) -> &DatasetAttributes {
        &self.attributes
    }

    fn fill_value(&self) -> Option<f32> {
        self.fill_value
    }

    async fn read_at(&self, leading: &[u64], spatial_index: u64) -> Result<f32> {
        let offset = self.metadata.flat_offset(leading, spatial_index)?;
        Ok(self.data[offset as usize])
    }
}
