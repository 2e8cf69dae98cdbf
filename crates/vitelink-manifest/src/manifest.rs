//! Manifest document parsing.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

/// A single manifest entry describing the output of one source file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct EntryRecord {
    /// Hashed output filename (e.g. `main.a1b2.js`)
    #[serde(default)]
    pub file: Option<String>,

    /// Stylesheets emitted for this entry, in build order
    #[serde(default)]
    pub css: Option<Vec<String>>,
}

impl EntryRecord {
    /// Stylesheet filenames, empty when the entry has none.
    pub fn stylesheets(&self) -> &[String] {
        self.css.as_deref().unwrap_or(&[])
    }
}

/// A parsed Vite manifest, keyed by source path (e.g. `src/main.ts`).
///
/// Entries are kept as raw JSON and only shape-checked when looked up, so an
/// odd sibling entry never hides a valid one. Fields Vite writes that nothing
/// here reads (`isEntry`, `imports`, ...) are ignored.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ManifestDocument {
    entries: HashMap<String, Value>,
}

impl ManifestDocument {
    /// Parse a manifest from JSON text.
    pub fn parse(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    /// Read and parse a manifest file.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = fs::read_to_string(path).map_err(|source| ManifestError::ReadError {
            path: path.display().to_string(),
            source,
        })?;

        let document = Self::parse(&content).map_err(|source| ManifestError::ParseError {
            path: path.display().to_string(),
            source,
        })?;

        tracing::debug!(
            "Loaded manifest {} with {} entries",
            path.display(),
            document.len()
        );

        Ok(document)
    }

    /// Look up the record for a source path. An entry whose shape does not
    /// match [`EntryRecord`] is treated as absent.
    pub fn get(&self, key: &str) -> Option<EntryRecord> {
        let value = self.entries.get(key)?;
        match EntryRecord::deserialize(value) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!("Ignoring malformed manifest entry '{}': {}", key, e);
                None
            }
        }
    }

    /// Number of entries in the manifest.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the manifest has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Errors that can occur when loading a manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Failed to read manifest {path}: {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest {path}: {source}")]
    ParseError {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_vite_manifest() {
        let source = r#"{
  "src/main.ts": {
    "file": "main.a1b2.js",
    "name": "main",
    "src": "src/main.ts",
    "isEntry": true,
    "css": ["main.a1b2.css", "vendor.c3d4.css"]
  },
  "_shared.e5f6.js": {
    "file": "shared.e5f6.js"
  }
}"#;

        let manifest = ManifestDocument::parse(source).unwrap();

        assert_eq!(manifest.len(), 2);

        let entry = manifest.get("src/main.ts").unwrap();
        assert_eq!(entry.file.as_deref(), Some("main.a1b2.js"));
        assert_eq!(entry.stylesheets(), ["main.a1b2.css", "vendor.c3d4.css"]);

        let chunk = manifest.get("_shared.e5f6.js").unwrap();
        assert!(chunk.stylesheets().is_empty());
    }

    #[test]
    fn missing_fields_are_absent() {
        let manifest = ManifestDocument::parse(r#"{"src/main.ts": {}}"#).unwrap();

        assert_eq!(manifest.get("src/main.ts"), Some(EntryRecord::default()));
        assert!(manifest.get("src/other.ts").is_none());
    }

    #[test]
    fn odd_sibling_entry_does_not_hide_valid_ones() {
        let source = r#"{
  "src/main.ts": {"file": "main.a1b2.js"},
  "src/other.ts": {"file": "o.js", "css": ["a.css", null]},
  "src/legacy.ts": "legacy.js"
}"#;

        let manifest = ManifestDocument::parse(source).unwrap();

        assert_eq!(manifest.len(), 3);
        assert_eq!(
            manifest.get("src/main.ts").and_then(|e| e.file),
            Some("main.a1b2.js".to_string())
        );
        assert!(manifest.get("src/other.ts").is_none());
        assert!(manifest.get("src/legacy.ts").is_none());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(ManifestDocument::parse("{ not json").is_err());
        assert!(ManifestDocument::parse(r#"["src/main.ts"]"#).is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ManifestDocument::load(&dir.path().join("manifest.json")).unwrap_err();

        assert!(matches!(err, ManifestError::ReadError { .. }));
    }

    #[test]
    fn load_reports_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        fs::write(&path, "{").unwrap();

        let err = ManifestDocument::load(&path).unwrap_err();

        assert!(matches!(err, ManifestError::ParseError { .. }));
        assert!(err.to_string().contains("manifest.json"));
    }
}
