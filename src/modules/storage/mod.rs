//! Storage module for generated assets
//!
//! Provides a flat-file object store under the static uploads directory.

mod local_store;

pub use local_store::{AssetKind, LocalObjectStore, StorageError, UPLOADS_URL_PREFIX};
