//! Asset tag resolution for Vite builds.
//!
//! Turns a logical entry name (e.g. `main`) into the `<script>` or `<link>`
//! markup for its hashed build output, using the Vite manifest when one is
//! available and unhashed development paths otherwise.

pub mod config;
pub mod resolver;
pub mod templates;

pub use config::AssetConfig;
pub use resolver::{
    AssetKind, AssetResolver, ManifestStrategy, Markup, ResolveStrategy, UnhashedStrategy,
};
pub use templates::{register_vite_asset, AssetTemplates};
