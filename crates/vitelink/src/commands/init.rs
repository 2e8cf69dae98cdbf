//! Write a default configuration file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub fn run(config_path: &Path, yes: bool) -> Result<()> {
    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::info!("Created {}", config_path.display());
    tracing::info!("Run 'vitelink build' to compile the frontend.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# vitelink configuration

[project]
# Base directory for every relative path below
base_dir = "."

[build]
# Frontend project the build command runs in
ui_dir = "ui"
command = ["npm", "run", "build"]

[static]
# Directory the build output is collected into
root = "static"
# Public URL prefix for static files
url = "/static/"
# Directories searched when the static root has no manifest
dirs = ["static"]

[manifest]
# Build output directory under the static root
dist_dir = "dist/svelte"
# Manifest keys are <source_prefix><entry><source_extension>
source_prefix = "src/"
source_extension = ".ts"
# Reuse the parsed manifest until the file changes
cache = false
"#;
