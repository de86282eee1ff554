//! Flat-file store for generated images
//!
//! Files live in a single directory that is also served by the static
//! file route, so the URL of a stored file is simply its route segment
//! plus the filename.

use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

/// Route segment under which the uploads directory is served
pub const UPLOADS_URL_PREFIX: &str = "/static/uploads/";

const FILE_EXTENSION: &str = "png";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Unsupported URL format: {0}")]
    UnsupportedUrl(String),

    #[error("Invalid filename in URL: {0}")]
    InvalidFilename(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Kind of generated asset, which determines the filename prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Figurine,
    Scene,
    Composed,
}

impl AssetKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            AssetKind::Figurine => "figurine_",
            AssetKind::Scene => "scene_",
            AssetKind::Composed => "composed_",
        }
    }
}

/// Local object store rooted at the uploads directory
pub struct LocalObjectStore {
    root: PathBuf,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Generate a fresh filename: `<prefix><unixSeconds>_<token>.png`.
    ///
    /// The random token keeps names unique when two requests store an asset
    /// of the same kind within the same second.
    pub fn generate_filename(kind: AssetKind) -> String {
        format!(
            "{}{}_{}.{}",
            kind.prefix(),
            Utc::now().timestamp(),
            Uuid::new_v4().simple(),
            FILE_EXTENSION
        )
    }

    /// Build the public URL for a stored filename
    pub fn url_for(filename: &str) -> String {
        format!("{}{}", UPLOADS_URL_PREFIX, filename)
    }

    /// Extract the stored filename from a URL.
    ///
    /// Accepts both `/static/uploads/<name>` and full URLs containing that
    /// segment (e.g. `http://localhost:8080/static/uploads/<name>`).
    pub fn filename_from_url(url: &str) -> Result<&str, StorageError> {
        let (_, rest) = url
            .split_once(UPLOADS_URL_PREFIX)
            .ok_or_else(|| StorageError::UnsupportedUrl(url.to_string()))?;

        // Drop any query string or fragment a browser may have appended
        let filename = rest.split(['?', '#']).next().unwrap_or_default();

        if filename.is_empty()
            || filename.contains('/')
            || filename.contains('\\')
            || filename.contains("..")
        {
            return Err(StorageError::InvalidFilename(url.to_string()));
        }

        Ok(filename)
    }

    /// Persist `data` as a new asset of the given kind and return its URL
    pub async fn put(&self, data: &[u8], kind: AssetKind) -> Result<String, StorageError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|source| StorageError::Io {
                path: self.root.clone(),
                source,
            })?;

        let filename = Self::generate_filename(kind);
        let path = self.root.join(&filename);

        tokio::fs::write(&path, data)
            .await
            .map_err(|source| StorageError::Io {
                path: path.clone(),
                source,
            })?;

        info!("Stored {} bytes at {}", data.len(), path.display());
        Ok(Self::url_for(&filename))
    }

    /// Load a previously stored asset by its URL
    pub async fn get(&self, url: &str) -> Result<Vec<u8>, StorageError> {
        let filename = Self::filename_from_url(url)?;
        let path = self.root.join(filename);

        debug!("Reading stored asset {}", path.display());
        let data = tokio::fs::read(&path)
            .await
            .map_err(|source| StorageError::Io {
                path: path.clone(),
                source,
            })?;

        debug!("Loaded {} bytes from {}", data.len(), path.display());
        Ok(data)
    }
}
