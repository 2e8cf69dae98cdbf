//! Render a template file with `vite_asset` available.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use vitelink_assets::AssetTemplates;

use crate::config::ConfigFile;

/// Run the render command.
pub fn run(
    config: &ConfigFile,
    template: &Path,
    output: Option<&Path>,
    vars: &[(String, String)],
) -> Result<()> {
    let html = render_file(config, template, vars)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::write(path, html).with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Rendered {} to {}", template.display(), path.display());
        }
        None => println!("{}", html),
    }

    Ok(())
}

fn render_file(config: &ConfigFile, template: &Path, vars: &[(String, String)]) -> Result<String> {
    if !template.is_file() {
        anyhow::bail!("Template not found: {}", template.display());
    }

    let name = template
        .file_name()
        .and_then(|n| n.to_str())
        .context("Template name is not valid UTF-8")?;
    let dir = template
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let templates = AssetTemplates::with_loader(Arc::new(config.resolver()), dir);
    let context: BTreeMap<&str, &str> = vars
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();

    templates
        .render(name, context)
        .with_context(|| format!("Failed to render {}", template.display()))
}
