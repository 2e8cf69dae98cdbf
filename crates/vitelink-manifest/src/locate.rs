//! Manifest location.
//!
//! A manifest is searched for through an ordered list of locators. The
//! first locator that yields an existing file wins.

use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Manifest path written by Vite 5 and later, relative to the build output.
pub const VITE_MANIFEST: &str = ".vite/manifest.json";

/// Manifest path written by older Vite versions, relative to the build output.
pub const LEGACY_MANIFEST: &str = "manifest.json";

/// Maps a relative static path to a file on disk.
pub trait StaticFinder: Send + Sync {
    /// Find the file for `relative`, if any source provides it.
    fn find(&self, relative: &str) -> Option<PathBuf>;
}

/// Finds static files by searching a list of directories in order.
#[derive(Debug, Clone, Default)]
pub struct FileSystemFinder {
    dirs: Vec<PathBuf>,
}

impl FileSystemFinder {
    /// Create a finder over the given directories.
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    /// Directories searched, in order.
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }
}

impl StaticFinder for FileSystemFinder {
    fn find(&self, relative: &str) -> Option<PathBuf> {
        self.dirs
            .iter()
            .map(|dir| dir.join(relative))
            .find(|path| path.is_file())
    }
}

/// A single strategy for finding the manifest file.
pub trait ManifestLocator: Send + Sync {
    /// Return the manifest path if this locator can find one.
    fn locate(&self) -> Option<PathBuf>;

    /// Human-readable description for logging.
    fn describe(&self) -> String;
}

/// Looks for the manifest at a fixed path under the static root.
#[derive(Debug, Clone)]
pub struct StaticRootLocator {
    path: PathBuf,
}

impl StaticRootLocator {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ManifestLocator for StaticRootLocator {
    fn locate(&self) -> Option<PathBuf> {
        self.path.is_file().then(|| self.path.clone())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Asks a static finder for the manifest.
pub struct FinderLocator {
    finder: Arc<dyn StaticFinder>,
    relative: String,
}

impl FinderLocator {
    pub fn new(finder: Arc<dyn StaticFinder>, relative: impl Into<String>) -> Self {
        Self {
            finder,
            relative: relative.into(),
        }
    }
}

impl ManifestLocator for FinderLocator {
    fn locate(&self) -> Option<PathBuf> {
        self.finder.find(&self.relative)
    }

    fn describe(&self) -> String {
        format!("finder:{}", self.relative)
    }
}

/// Build the standard locator chain for a build output directory.
///
/// Order: `<root>/<dist>/.vite/manifest.json`, `<root>/<dist>/manifest.json`,
/// then the finder with the same two relative paths.
pub fn default_locators(
    static_root: &Path,
    dist_dir: &str,
    finder: Arc<dyn StaticFinder>,
) -> Vec<Box<dyn ManifestLocator>> {
    let dist = dist_dir.trim_matches('/');
    let output = static_root.join(dist);

    vec![
        Box::new(StaticRootLocator::new(output.join(VITE_MANIFEST))),
        Box::new(StaticRootLocator::new(output.join(LEGACY_MANIFEST))),
        Box::new(FinderLocator::new(
            Arc::clone(&finder),
            format!("{}/{}", dist, VITE_MANIFEST),
        )),
        Box::new(FinderLocator::new(finder, format!("{}/{}", dist, LEGACY_MANIFEST))),
    ]
}

/// Run locators in order and return the first manifest found.
pub fn locate_manifest(locators: &[Box<dyn ManifestLocator>]) -> Option<PathBuf> {
    for locator in locators {
        if let Some(path) = locator.locate() {
            tracing::debug!("Found manifest via {}", locator.describe());
            return Some(path);
        }
    }

    tracing::debug!("No manifest found after {} locations", locators.len());
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "{}").unwrap();
    }

    #[test]
    fn prefers_vite_subdirectory() {
        let root = tempfile::tempdir().unwrap();
        let vite = root.path().join("dist/svelte/.vite/manifest.json");
        let legacy = root.path().join("dist/svelte/manifest.json");
        write(&vite);
        write(&legacy);

        let locators = default_locators(
            root.path(),
            "dist/svelte",
            Arc::new(FileSystemFinder::default()),
        );

        assert_eq!(locate_manifest(&locators), Some(vite));
    }

    #[test]
    fn falls_back_to_flat_directory() {
        let root = tempfile::tempdir().unwrap();
        let legacy = root.path().join("dist/svelte/manifest.json");
        write(&legacy);

        let locators = default_locators(
            root.path(),
            "dist/svelte",
            Arc::new(FileSystemFinder::default()),
        );

        assert_eq!(locate_manifest(&locators), Some(legacy));
    }

    #[test]
    fn falls_back_to_finder() {
        let root = tempfile::tempdir().unwrap();
        let app_static = tempfile::tempdir().unwrap();
        let found = app_static.path().join("dist/svelte/manifest.json");
        write(&found);

        let finder = FileSystemFinder::new(vec![
            root.path().join("missing"),
            app_static.path().to_path_buf(),
        ]);
        let locators = default_locators(root.path(), "/dist/svelte/", Arc::new(finder));

        assert_eq!(locate_manifest(&locators), Some(found));
    }

    #[test]
    fn finder_prefers_vite_subdirectory() {
        let root = tempfile::tempdir().unwrap();
        let app_static = tempfile::tempdir().unwrap();
        let vite = app_static.path().join("dist/svelte/.vite/manifest.json");
        write(&vite);
        write(&app_static.path().join("dist/svelte/manifest.json"));

        let finder = FileSystemFinder::new(vec![app_static.path().to_path_buf()]);
        let locators = default_locators(root.path(), "dist/svelte", Arc::new(finder));

        assert_eq!(locate_manifest(&locators), Some(vite));
    }

    #[test]
    fn finder_searches_dirs_in_order() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        write(&first.path().join("app.css"));
        write(&second.path().join("app.css"));

        let finder = FileSystemFinder::new(vec![
            first.path().to_path_buf(),
            second.path().to_path_buf(),
        ]);

        assert_eq!(finder.find("app.css"), Some(first.path().join("app.css")));
        assert_eq!(finder.find("other.css"), None);
    }

    #[test]
    fn returns_none_when_nothing_exists() {
        let root = tempfile::tempdir().unwrap();
        let locators = default_locators(
            root.path(),
            "dist/svelte",
            Arc::new(FileSystemFinder::new(vec![root.path().to_path_buf()])),
        );

        assert_eq!(locate_manifest(&locators), None);
    }
}
