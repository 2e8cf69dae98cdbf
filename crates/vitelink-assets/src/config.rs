//! Asset resolution settings.

use std::path::PathBuf;

/// Settings shared by all resolution strategies.
#[derive(Debug, Clone)]
pub struct AssetConfig {
    /// Directory the build output is collected into
    pub static_root: PathBuf,

    /// Public URL prefix static files are served under
    pub static_url: String,

    /// Build output directory, relative to the static root and URL prefix
    pub dist_dir: String,

    /// Source directory prefix used in manifest keys
    pub source_prefix: String,

    /// Source file extension used in manifest keys
    pub source_extension: String,

    /// Reuse parsed manifests while the file is unchanged
    pub cache_manifest: bool,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            static_root: PathBuf::from("static"),
            static_url: "/static/".to_string(),
            dist_dir: "dist/svelte".to_string(),
            source_prefix: "src/".to_string(),
            source_extension: ".ts".to_string(),
            cache_manifest: false,
        }
    }
}

impl AssetConfig {
    /// The static URL prefix, always ending in `/` unless empty.
    pub fn public_prefix(&self) -> String {
        if self.static_url.is_empty() || self.static_url.ends_with('/') {
            self.static_url.clone()
        } else {
            format!("{}/", self.static_url)
        }
    }

    /// URL prefix of the build output directory.
    pub fn dist_url(&self) -> String {
        let dist = self.dist_dir.trim_matches('/');
        if dist.is_empty() {
            self.public_prefix()
        } else {
            format!("{}{}/", self.public_prefix(), dist)
        }
    }

    /// Manifest key for an entry (`main` -> `src/main.ts`).
    pub fn entry_key(&self, entry_name: &str) -> String {
        format!(
            "{}{}{}",
            self.source_prefix, entry_name, self.source_extension
        )
    }
}
