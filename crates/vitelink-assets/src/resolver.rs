//! Entry resolution through an ordered chain of strategies.

use std::fmt;
use std::sync::Arc;

use vitelink_manifest::{
    default_locators, locate_manifest, ManifestLoader, ManifestLocator, StaticFinder,
};

use crate::config::AssetConfig;

/// Kind of asset requested for an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// ES module script (`js`)
    Script,

    /// Stylesheet (`css`)
    Stylesheet,
}

impl AssetKind {
    /// Parse the template-facing name (`js` or `css`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "js" => Some(Self::Script),
            "css" => Some(Self::Stylesheet),
            _ => None,
        }
    }

    /// Template-facing name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Script => "js",
            Self::Stylesheet => "css",
        }
    }

    /// Extension of unhashed development files.
    fn extension(self) -> &'static str {
        self.name()
    }
}

/// HTML markup ready for direct embedding. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn script_tag(src: &str) -> String {
    format!(r#"<script type="module" src="{}"></script>"#, src)
}

fn link_tag(href: &str) -> String {
    format!(r#"<link rel="stylesheet" href="{}">"#, href)
}

/// One tier of asset resolution.
pub trait ResolveStrategy: Send + Sync {
    /// Strategy identifier for logging.
    fn name(&self) -> &'static str;

    /// Produce markup for the entry, or `None` to defer to the next tier.
    fn resolve(&self, entry_name: &str, kind: AssetKind) -> Option<Markup>;
}

/// Resolves hashed filenames from the Vite manifest.
pub struct ManifestStrategy {
    config: AssetConfig,
    locators: Vec<Box<dyn ManifestLocator>>,
    loader: ManifestLoader,
}

impl ManifestStrategy {
    /// Create a strategy using the standard manifest locations.
    pub fn new(config: AssetConfig, finder: Arc<dyn StaticFinder>) -> Self {
        let locators = default_locators(&config.static_root, &config.dist_dir, finder);
        Self::with_locators(config, locators)
    }

    /// Create a strategy with a custom locator chain.
    pub fn with_locators(config: AssetConfig, locators: Vec<Box<dyn ManifestLocator>>) -> Self {
        let loader = ManifestLoader::new(config.cache_manifest);
        Self {
            config,
            locators,
            loader,
        }
    }
}

impl ResolveStrategy for ManifestStrategy {
    fn name(&self) -> &'static str {
        "manifest"
    }

    fn resolve(&self, entry_name: &str, kind: AssetKind) -> Option<Markup> {
        let path = locate_manifest(&self.locators)?;

        let manifest = match self.loader.load(&path) {
            Ok(manifest) => manifest,
            Err(e) => {
                tracing::warn!("{}", e);
                return None;
            }
        };

        let key = self.config.entry_key(entry_name);
        let Some(entry) = manifest.get(&key) else {
            tracing::debug!("Entry '{}' not found in {}", key, path.display());
            return None;
        };

        let dist_url = self.config.dist_url();

        match kind {
            AssetKind::Script => {
                let Some(file) = entry.file.as_deref() else {
                    tracing::debug!("Entry '{}' has no output file", key);
                    return None;
                };
                Some(Markup(script_tag(&format!("{}{}", dist_url, file))))
            }
            AssetKind::Stylesheet => {
                let links: Vec<String> = entry
                    .stylesheets()
                    .iter()
                    .map(|css| link_tag(&format!("{}{}", dist_url, css)))
                    .collect();
                Some(Markup(links.join("\n")))
            }
        }
    }
}

/// Development fallback: unhashed `<entry>.js` / `<entry>.css` under the
/// static URL.
pub struct UnhashedStrategy {
    prefix: String,
}

impl UnhashedStrategy {
    pub fn new(config: &AssetConfig) -> Self {
        Self {
            prefix: config.public_prefix(),
        }
    }
}

impl ResolveStrategy for UnhashedStrategy {
    fn name(&self) -> &'static str {
        "unhashed"
    }

    fn resolve(&self, entry_name: &str, kind: AssetKind) -> Option<Markup> {
        let url = format!("{}{}.{}", self.prefix, entry_name, kind.extension());

        let markup = match kind {
            AssetKind::Script => script_tag(&url),
            AssetKind::Stylesheet => link_tag(&url),
        };

        Some(Markup(markup))
    }
}

/// Resolves entries by trying each strategy in order until one answers.
pub struct AssetResolver {
    strategies: Vec<Box<dyn ResolveStrategy>>,
}

impl AssetResolver {
    /// Create a resolver with the manifest tier followed by the unhashed
    /// fallback.
    pub fn new(config: AssetConfig, finder: Arc<dyn StaticFinder>) -> Self {
        let fallback = UnhashedStrategy::new(&config);
        Self::with_strategies(vec![
            Box::new(ManifestStrategy::new(config, finder)),
            Box::new(fallback),
        ])
    }

    /// Create a resolver from an explicit strategy chain.
    pub fn with_strategies(strategies: Vec<Box<dyn ResolveStrategy>>) -> Self {
        Self { strategies }
    }

    /// Resolve markup for an entry. Returns empty markup if no strategy
    /// answers.
    pub fn resolve(&self, entry_name: &str, kind: AssetKind) -> Markup {
        for strategy in &self.strategies {
            if let Some(markup) = strategy.resolve(entry_name, kind) {
                tracing::trace!(
                    "Resolved {} '{}' via {}",
                    kind.name(),
                    entry_name,
                    strategy.name()
                );
                return markup;
            }
        }

        Markup::default()
    }

    /// Resolve using the template-facing asset type name. Unrecognized
    /// names produce empty markup.
    pub fn resolve_named(&self, entry_name: &str, asset_type: &str) -> Markup {
        match AssetKind::from_name(asset_type) {
            Some(kind) => self.resolve(entry_name, kind),
            None => {
                tracing::debug!("Unknown asset type '{}' for '{}'", asset_type, entry_name);
                Markup::default()
            }
        }
    }
}
