//! Configuration file (vitelink.toml).

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Deserialize;
use vitelink_assets::{AssetConfig, AssetResolver};
use vitelink_build::BuildConfig;
use vitelink_manifest::FileSystemFinder;

/// Configuration file structure.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ConfigFile {
    pub project: ProjectConfig,
    pub build: BuildSettings,
    #[serde(rename = "static")]
    pub static_files: StaticSettings,
    pub manifest: ManifestSettings,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Base directory every relative path is resolved against
    pub base_dir: PathBuf,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    /// Frontend project directory the build runs in
    pub ui_dir: PathBuf,
    /// Program followed by its arguments
    pub command: Vec<String>,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            ui_dir: PathBuf::from("ui"),
            command: vec!["npm".to_string(), "run".to_string(), "build".to_string()],
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StaticSettings {
    pub root: PathBuf,
    pub url: String,
    /// Directories searched by the static file finder, in order
    pub dirs: Vec<PathBuf>,
}

impl Default for StaticSettings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("static"),
            url: "/static/".to_string(),
            dirs: vec![PathBuf::from("static")],
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ManifestSettings {
    pub dist_dir: String,
    pub source_prefix: String,
    pub source_extension: String,
    pub cache: bool,
}

impl Default for ManifestSettings {
    fn default() -> Self {
        let assets = AssetConfig::default();
        Self {
            dist_dir: assets.dist_dir,
            source_prefix: assets.source_prefix,
            source_extension: assets.source_extension,
            cache: assets.cache_manifest,
        }
    }
}

impl ConfigFile {
    /// Load configuration from `path` if it exists, defaults otherwise.
    /// Returns an error if the file exists but is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No {} found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        self.project.base_dir.join(path)
    }

    /// Settings for the build trigger.
    pub fn build_config(&self) -> Result<BuildConfig> {
        let Some((program, args)) = self.build.command.split_first() else {
            anyhow::bail!("build.command must name a program");
        };

        Ok(BuildConfig {
            working_dir: self.resolve_path(&self.build.ui_dir),
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    /// Settings for asset resolution.
    pub fn asset_config(&self) -> AssetConfig {
        AssetConfig {
            static_root: self.resolve_path(&self.static_files.root),
            static_url: self.static_files.url.clone(),
            dist_dir: self.manifest.dist_dir.clone(),
            source_prefix: self.manifest.source_prefix.clone(),
            source_extension: self.manifest.source_extension.clone(),
            cache_manifest: self.manifest.cache,
        }
    }

    /// Static file finder over the configured directories.
    pub fn finder(&self) -> FileSystemFinder {
        FileSystemFinder::new(
            self.static_files
                .dirs
                .iter()
                .map(|dir| self.resolve_path(dir))
                .collect(),
        )
    }

    /// Asset resolver with the standard fallback chain.
    pub fn resolver(&self) -> AssetResolver {
        AssetResolver::new(self.asset_config(), Arc::new(self.finder()))
    }
}
