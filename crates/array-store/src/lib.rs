//! Array store access for chunked weather data.
//!
//! The grid resolver produces flat spatial indices; this crate owns the
//! other side of that contract: the dimension vector a store must declare
//! and the value-read interface. Byte-level concerns — chunk layout,
//! compression, range reads — stay inside the container library (`zarrs`);
//! nothing here decodes bytes.
//!
//! Two readers are provided: [`InMemoryArrayStore`] for tests and demo
//! data, and [`ZarrArrayStore`] over any readable Zarr storage backend.

pub mod error;
pub mod metadata;
pub mod reader;
pub mod zarr;

pub use error::{Result, StoreError};
pub use metadata::{ArrayStoreMetadata, DatasetAttributes};
pub use reader::{ArrayReader, InMemoryArrayStore};
pub use zarr::ZarrArrayStore;
