//! Vite build manifest model, loading and lookup.
//!
//! This crate parses the `manifest.json` a Vite build writes next to its
//! output, locates it under a static root or through a static file finder,
//! and optionally caches the parsed document between reads.

pub mod cache;
pub mod locate;
pub mod manifest;

pub use cache::{ManifestCache, ManifestLoader};
pub use locate::{
    default_locators, locate_manifest, FileSystemFinder, FinderLocator, ManifestLocator,
    StaticFinder, StaticRootLocator, LEGACY_MANIFEST, VITE_MANIFEST,
};
pub use manifest::{EntryRecord, ManifestDocument, ManifestError};
