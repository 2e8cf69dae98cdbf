//! Template integration: exposes `vite_asset` to minijinja templates.

use std::path::Path;
use std::sync::Arc;

use minijinja::{Environment, Value};
use serde::Serialize;

use crate::resolver::AssetResolver;

/// Asset type used when a template omits it.
pub const DEFAULT_ASSET_TYPE: &str = "js";

/// Register `vite_asset(entry_name, asset_type="js")` on an environment.
///
/// The returned markup is marked safe so auto-escaping leaves the tags intact.
pub fn register_vite_asset(env: &mut Environment<'_>, resolver: Arc<AssetResolver>) {
    env.add_function(
        "vite_asset",
        move |entry_name: String, asset_type: Option<String>| -> Value {
            let asset_type = asset_type.as_deref().unwrap_or(DEFAULT_ASSET_TYPE);
            let markup = resolver.resolve_named(&entry_name, asset_type);
            Value::from_safe_string(markup.into_string())
        },
    );
}

/// Template environment with `vite_asset` available.
pub struct AssetTemplates {
    env: Environment<'static>,
}

impl AssetTemplates {
    /// Create an environment with no templates loaded.
    pub fn new(resolver: Arc<AssetResolver>) -> Self {
        let mut env = Environment::new();
        register_vite_asset(&mut env, resolver);
        Self { env }
    }

    /// Create an environment that loads templates from a directory, so
    /// `extends` and `include` resolve against it.
    pub fn with_loader(resolver: Arc<AssetResolver>, dir: impl AsRef<Path>) -> Self {
        let mut templates = Self::new(resolver);
        templates
            .env
            .set_loader(minijinja::path_loader(dir.as_ref().to_path_buf()));
        templates
    }

    /// Add a template from source.
    pub fn add_template(
        &mut self,
        name: impl Into<String>,
        source: impl Into<String>,
    ) -> Result<(), minijinja::Error> {
        self.env.add_template_owned(name.into(), source.into())
    }

    /// Render a template with the given context.
    pub fn render<S: Serialize>(&self, name: &str, context: S) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(name)?;
        tmpl.render(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;
    use pretty_assertions::assert_eq;
    use std::fs;
    use vitelink_manifest::FileSystemFinder;

    use crate::config::AssetConfig;

    const MANIFEST: &str = r#"{
  "src/main.ts": {"file": "main.a1b2.js", "css": ["main.a1b2.css", "extra.c3d4.css"]}
}"#;

    fn resolver(root: &Path) -> Arc<AssetResolver> {
        let config = AssetConfig {
            static_root: root.to_path_buf(),
            ..Default::default()
        };
        Arc::new(AssetResolver::new(
            config,
            Arc::new(FileSystemFinder::default()),
        ))
    }

    fn with_manifest() -> tempfile::TempDir {
        let root = tempfile::tempdir().unwrap();
        let path = root.path().join("dist/svelte/.vite/manifest.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, MANIFEST).unwrap();
        root
    }

    #[test]
    fn renders_script_tag_unescaped() {
        let root = with_manifest();
        let mut templates = AssetTemplates::new(resolver(root.path()));
        templates
            .add_template("page.html", r#"{{ vite_asset("main") }}"#)
            .unwrap();

        let html = templates.render("page.html", context! {}).unwrap();

        assert_eq!(
            html,
            r#"<script type="module" src="/static/dist/svelte/main.a1b2.js"></script>"#
        );
    }

    #[test]
    fn renders_stylesheet_tags() {
        let root = with_manifest();
        let mut templates = AssetTemplates::new(resolver(root.path()));
        templates
            .add_template("head.html", r#"<head>{{ vite_asset(entry, "css") }}</head>"#)
            .unwrap();

        let html = templates
            .render("head.html", context! { entry => "main" })
            .unwrap();

        assert_eq!(
            html,
            "<head><link rel=\"stylesheet\" href=\"/static/dist/svelte/main.a1b2.css\">\n\
             <link rel=\"stylesheet\" href=\"/static/dist/svelte/extra.c3d4.css\"></head>"
        );
    }

    #[test]
    fn falls_back_without_manifest() {
        let root = tempfile::tempdir().unwrap();
        let mut templates = AssetTemplates::new(resolver(root.path()));
        templates
            .add_template(
                "page.html",
                r#"{{ vite_asset("main", "css") }}|{{ vite_asset("main", "png") }}|"#,
            )
            .unwrap();

        let html = templates.render("page.html", context! {}).unwrap();

        assert_eq!(html, r#"<link rel="stylesheet" href="/static/main.css">||"#);
    }

    #[test]
    fn loads_templates_from_directory() {
        let root = with_manifest();
        let templates_dir = tempfile::tempdir().unwrap();
        fs::write(
            templates_dir.path().join("base.html"),
            "<body>{% block scripts %}{% endblock %}</body>",
        )
        .unwrap();
        fs::write(
            templates_dir.path().join("index.html"),
            r#"{% extends "base.html" %}{% block scripts %}{{ vite_asset("main", "js") }}{% endblock %}"#,
        )
        .unwrap();

        let templates = AssetTemplates::with_loader(resolver(root.path()), templates_dir.path());
        let html = templates.render("index.html", context! {}).unwrap();

        assert_eq!(
            html,
            r#"<body><script type="module" src="/static/dist/svelte/main.a1b2.js"></script></body>"#
        );
    }
}
