//! Point query pipeline.

use std::sync::Arc;

use array_store::{ArrayReader, ArrayStoreMetadata};
use grid_geometry::{GridPoint, GridSpec};

use crate::error::Result;

/// A resolved point together with the value read from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSample {
    /// The nearest stored grid point.
    pub point: GridPoint,
    /// `None` when the stored value is NaN or the declared fill value —
    /// distinct from an off-grid query, which fails `OutOfBounds` instead.
    pub value: Option<f32>,
}

/// Check that a geometry's point count matches the store's declared shape.
///
/// Called once at dataset open time, not per query. A mismatch is fatal for
/// this (spec, store) pairing: the dataset must not be opened with it.
pub fn validate(spec: &GridSpec, metadata: &ArrayStoreMetadata) -> Result<()> {
    Ok(spec.validate_dimensions(metadata.dimensions())?)
}

/// Orchestrates a [`GridSpec`] and an [`ArrayReader`] for point queries.
///
/// Both halves are immutable after [`QueryPipeline::open`]; clones share
/// them, and the pipeline is safe to use from any number of concurrent
/// tasks. The only cache involved is the Gaussian row index precomputed
/// inside the spec — results of distinct queries are never cached.
#[derive(Clone)]
pub struct QueryPipeline {
    spec: GridSpec,
    store: Arc<dyn ArrayReader>,
}

impl QueryPipeline {
    /// Validate `spec` against the store's dimensions and build the
    /// pipeline. Fails with `ShapeMismatch` before any value can be read.
    pub fn open(spec: GridSpec, store: Arc<dyn ArrayReader>) -> Result<Self> {
        validate(&spec, store.metadata())?;
        tracing::debug!(
            points = spec.total_points(),
            dimensions = ?store.metadata().dimensions(),
            "opened query pipeline"
        );
        Ok(Self { spec, store })
    }

    /// The grid geometry this pipeline resolves against.
    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    /// The underlying array store.
    pub fn store(&self) -> &Arc<dyn ArrayReader> {
        &self.store
    }

    /// Resolve a coordinate to a grid point without touching the store.
    pub fn query(&self, lat: f64, lon: f64) -> Result<GridPoint> {
        Ok(self.spec.resolve(lat, lon)?)
    }

    /// Resolve a coordinate and read the stored value.
    ///
    /// `leading` indexes any non-spatial axes (time, level) of the store.
    pub async fn query_value(&self, lat: f64, lon: f64, leading: &[u64]) -> Result<PointSample> {
        let point = self.spec.resolve(lat, lon)?;
        let raw = self.store.read_at(leading, point.index).await?;

        let missing = raw.is_nan()
            || self
                .store
                .fill_value()
                .is_some_and(|fill| raw == fill);

        tracing::debug!(lat, lon, index = point.index, value = f64::from(raw), "point query");
        Ok(PointSample {
            point,
            value: if missing { None } else { Some(raw) },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use array_store::InMemoryArrayStore;
    use grid_geometry::{GaussianGrid, GridError, RegularGrid, WrapPolicy};

    fn regular_pipeline() -> QueryPipeline {
        // 4x3 one-degree grid starting at (0N, 0E); value = index * 10.
        let spec: GridSpec = RegularGrid::new(4, 3, 0.0, 0.0, 1.0, 1.0, WrapPolicy::None)
            .unwrap()
            .into();
        let data: Vec<f32> = (0..12).map(|v| (v * 10) as f32).collect();
        let store = InMemoryArrayStore::new(vec![3, 4], data).unwrap();
        QueryPipeline::open(spec, Arc::new(store)).unwrap()
    }

    #[test]
    fn test_open_rejects_shape_mismatch() {
        let spec: GridSpec = GaussianGrid::from_rows(&[(10.0, 1000), (-10.0, 1000)])
            .unwrap()
            .into();
        let store = InMemoryArrayStore::new(vec![1, 1999], vec![0.0; 1999]).unwrap();
        let result = QueryPipeline::open(spec, Arc::new(store));
        assert!(matches!(
            result,
            Err(crate::QueryError::Grid(GridError::ShapeMismatch { .. }))
        ));
    }

    #[tokio::test]
    async fn test_query_value_round_trip() {
        let pipeline = regular_pipeline();
        let sample = pipeline.query_value(2.0, 3.0, &[]).await.unwrap();
        assert_eq!(sample.point.x, 3);
        assert_eq!(sample.point.y, 2);
        assert_eq!(sample.point.index, 11);
        assert_eq!(sample.value, Some(110.0));
    }

    #[tokio::test]
    async fn test_query_value_reports_missing_as_none() {
        let spec: GridSpec = RegularGrid::new(2, 1, 0.0, 0.0, 1.0, 1.0, WrapPolicy::None)
            .unwrap()
            .into();
        let store = InMemoryArrayStore::new(vec![1, 2], vec![f32::NAN, -9999.0])
            .unwrap()
            .with_fill_value(-9999.0);
        let pipeline = QueryPipeline::open(spec, Arc::new(store)).unwrap();

        let sample = pipeline.query_value(0.0, 0.0, &[]).await.unwrap();
        assert_eq!(sample.value, None);
        let sample = pipeline.query_value(0.0, 1.0, &[]).await.unwrap();
        assert_eq!(sample.value, None);
    }

    #[tokio::test]
    async fn test_out_of_bounds_is_recoverable() {
        let pipeline = regular_pipeline();
        let err = pipeline.query_value(45.0, 0.0, &[]).await.unwrap_err();
        assert!(err.is_out_of_bounds());
    }

    #[tokio::test]
    async fn test_gaussian_pipeline_with_flat_store() {
        let spec: GridSpec =
            GaussianGrid::from_rows(&[(45.0, 4), (15.0, 8), (-15.0, 8), (-45.0, 4)])
                .unwrap()
                .into();
        let data: Vec<f32> = (0..24).map(|v| v as f32).collect();
        let store = InMemoryArrayStore::new(vec![1, 24], data).unwrap();
        let pipeline = QueryPipeline::open(spec, Arc::new(store)).unwrap();

        // Second row, 90E: x = round(90 * 8 / 360) = 2, index = 4 + 2.
        let sample = pipeline.query_value(15.0, 90.0, &[]).await.unwrap();
        assert_eq!(sample.point.y, 1);
        assert_eq!(sample.point.x, 2);
        assert_eq!(sample.value, Some(6.0));
    }
}
