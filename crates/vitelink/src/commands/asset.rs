//! Print the markup a template would get for an entry.

use anyhow::Result;

use crate::config::ConfigFile;

/// Run the asset command.
pub fn run(config: &ConfigFile, entry: &str, asset_type: &str) -> Result<()> {
    let markup = config.resolver().resolve_named(entry, asset_type);

    if markup.is_empty() {
        tracing::warn!("No {} markup for '{}'", asset_type, entry);
    } else {
        println!("{}", markup);
    }

    Ok(())
}
