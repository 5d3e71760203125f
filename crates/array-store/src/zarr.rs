//! Zarr-backed array store.

use std::sync::Arc;

use async_trait::async_trait;
use zarrs::array::Array;
use zarrs::array_subset::ArraySubset;
use zarrs::storage::ReadableStorageTraits;

use crate::error::{Result, StoreError};
use crate::metadata::{ArrayStoreMetadata, DatasetAttributes};
use crate::reader::ArrayReader;

/// Array store reading a Zarr V3 array.
///
/// Chunk layout, compression and byte-range access all stay inside `zarrs`;
/// this type only turns `(leading indices, flat spatial index)` into a
/// single-element subset read.
pub struct ZarrArrayStore<S: ReadableStorageTraits> {
    /// The Zarr array.
    array: Array<S>,
    /// Storage path (for logging).
    path: String,
    /// Declared shape, spatial axes last.
    metadata: ArrayStoreMetadata,
    /// Attributes parsed from the array, absent entries left `None`.
    attributes: DatasetAttributes,
    /// Fill value decoded from the array, when it is an f32.
    fill_value: Option<f32>,
}

impl<S: ReadableStorageTraits + Send + Sync + 'static> ZarrArrayStore<S> {
    /// Open a Zarr array from storage.
    pub fn open(storage: S, path: &str) -> Result<Self> {
        let array = Array::open(Arc::new(storage), path)
            .map_err(|e| StoreError::open_failed(e.to_string()))?;

        let metadata = ArrayStoreMetadata::new(array.shape().to_vec())?;
        let attributes = DatasetAttributes::from_attributes(array.attributes());
        let fill_value = array
            .fill_value()
            .as_ne_bytes()
            .try_into()
            .map(f32::from_ne_bytes)
            .ok();

        tracing::debug!(
            path,
            dimensions = ?metadata.dimensions(),
            "opened zarr array"
        );

        Ok(Self {
            array,
            path: path.to_string(),
            metadata,
            attributes,
            fill_value,
        })
    }

    /// Read a single element at the given per-axis indices.
    fn read_element(&self, start: Vec<u64>) -> Result<f32> {
        let shape = vec![1u64; start.len()];
        let subset = ArraySubset::new_with_start_shape(start, shape)
            .map_err(|e| StoreError::read_failed(e.to_string()))?;

        let values: Vec<f32> = self
            .array
            .retrieve_array_subset_elements(&subset)
            .map_err(|e| StoreError::read_failed(e.to_string()))?;

        values
            .first()
            .copied()
            .ok_or_else(|| StoreError::read_failed("empty subset read"))
    }
}

#[async_trait]
impl<S: ReadableStorageTraits + Send + Sync + 'static> ArrayReader for ZarrArrayStore<S> {
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
        // Bounds-check the request before touching storage.
        self.metadata.flat_offset(leading, spatial_index)?;

        let nx = self.metadata.spatial_nx();
        let mut start = leading.to_vec();
        start.push(spatial_index / nx);
        start.push(spatial_index % nx);

        tracing::debug!(path = %self.path, ?start, "reading element");
        self.read_element(start)
    }
}
