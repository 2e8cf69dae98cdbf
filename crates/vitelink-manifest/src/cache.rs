//! Optional manifest caching keyed by file modification time.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use crate::manifest::{ManifestDocument, ManifestError};

/// How manifests are read on each resolution.
#[derive(Debug, Default)]
pub enum ManifestLoader {
    /// Read and parse the file on every call
    #[default]
    Fresh,

    /// Reuse the parsed document while the file's mtime is unchanged
    Cached(ManifestCache),
}

impl ManifestLoader {
    /// Create a loader, cached or not.
    pub fn new(cache: bool) -> Self {
        if cache {
            Self::Cached(ManifestCache::new())
        } else {
            Self::Fresh
        }
    }

    /// Load the manifest at `path`.
    pub fn load(&self, path: &Path) -> Result<Arc<ManifestDocument>, ManifestError> {
        match self {
            Self::Fresh => ManifestDocument::load(path).map(Arc::new),
            Self::Cached(cache) => cache.load(path),
        }
    }
}

#[derive(Debug)]
struct CachedManifest {
    modified: SystemTime,
    document: Arc<ManifestDocument>,
}

/// Parsed manifests by path. Failed loads are never stored.
#[derive(Debug, Default)]
pub struct ManifestCache {
    entries: Mutex<HashMap<PathBuf, CachedManifest>>,
}

impl ManifestCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `path`, reusing the cached document if its mtime has not changed.
    pub fn load(&self, path: &Path) -> Result<Arc<ManifestDocument>, ManifestError> {
        let modified = fs::metadata(path)
            .and_then(|meta| meta.modified())
            .map_err(|source| ManifestError::ReadError {
                path: path.display().to_string(),
                source,
            })?;

        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(cached) = entries.get(path) {
            if cached.modified == modified {
                tracing::trace!("Manifest cache hit for {}", path.display());
                return Ok(Arc::clone(&cached.document));
            }
        }

        let document = Arc::new(ManifestDocument::load(path)?);
        entries.insert(
            path.to_path_buf(),
            CachedManifest {
                modified,
                document: Arc::clone(&document),
            },
        );

        Ok(document)
    }
}
