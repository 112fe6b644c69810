//! Page template engine built on minijinja.
//!
//! Loads every `.jinja` file under the configured template directory into a
//! single environment at startup and renders by template name. The engine is
//! constructed once and shared through handler state, so tests can point it
//! at alternative template directories.

use std::path::Path;

use minijinja::{Environment, Value};
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

/// Immutable set of page templates.
#[derive(Debug)]
pub struct PageTemplates {
    env: Environment<'static>,
}

impl PageTemplates {
    /// Load all `.jinja` templates from `dir` (recursively).
    ///
    /// Template names are paths relative to `dir`, e.g. `index.html.jinja`.
    /// A missing directory yields an empty environment; rendering then fails
    /// per template with `NotFound`.
    pub fn from_dir(dir: &Path) -> Self {
        let mut env = Environment::new();
        env.add_filter("format_timestamp", format_timestamp_filter);
        env.add_filter("day_status_color", day_status_color_filter);

        if dir.exists() {
            load_templates_recursive(&mut env, dir, dir);
        }

        Self { env }
    }

    /// Render a template with a serializable context.
    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, TemplateError> {
        let template = self
            .env
            .get_template(name)
            .map_err(|_| TemplateError::NotFound(name.to_string()))?;

        template
            .render(Value::from_serialize(&ctx))
            .map_err(|e| TemplateError::RenderError(e.to_string()))
    }
}

/// Recursively load all `.jinja` templates from a directory.
fn load_templates_recursive(env: &mut Environment<'static>, base_path: &Path, current_path: &Path) {
    if let Ok(entries) = std::fs::read_dir(current_path) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                load_templates_recursive(env, base_path, &path);
            } else if path.extension().is_some_and(|ext| ext == "jinja") {
                if let Ok(relative) = path.strip_prefix(base_path) {
                    let template_name = relative.to_string_lossy().to_string();
                    if let Ok(content) = std::fs::read_to_string(&path) {
                        // Leak into 'static: templates live for the whole process.
                        let static_name: &'static str =
                            Box::leak(template_name.clone().into_boxed_str());
                        let static_content: &'static str = Box::leak(content.into_boxed_str());
                        if let Err(e) = env.add_template(static_name, static_content) {
                            tracing::warn!("Failed to load template {}: {}", template_name, e);
                        } else {
                            tracing::debug!("Loaded template: {}", template_name);
                        }
                    }
                }
            }
        }
    }
}

/// Jinja filter: epoch seconds to display timestamp.
fn format_timestamp_filter(epoch_secs: i64) -> String {
    crate::features::status::services::status_service::format_timestamp(epoch_secs)
}

/// Jinja filter: history day tag to its traffic-light color.
fn day_status_color_filter(status: &str) -> &'static str {
    match status {
        "degraded" | "major" => "red",
        "partial" | "maintenance" | "investigating" => "yellow",
        _ => "green",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[derive(Serialize)]
    struct Ctx {
        name: String,
        started_at: i64,
    }

    #[test]
    fn test_render_with_filters() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html.jinja");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            "{{{{ name }}}}: {{{{ started_at | format_timestamp }}}} [{{{{ 'major' | day_status_color }}}}]"
        )
        .unwrap();

        let templates = PageTemplates::from_dir(dir.path());
        let html = templates
            .render(
                "page.html.jinja",
                Ctx {
                    name: "Outage".to_string(),
                    started_at: 1725749130,
                },
            )
            .unwrap();

        assert_eq!(html, "Outage: September 07, 2024 at 10:45 PM [red]");
    }

    #[test]
    fn test_missing_template_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let templates = PageTemplates::from_dir(dir.path());
        let err = templates.render("nope.html.jinja", ()).unwrap_err();
        assert!(matches!(err, TemplateError::NotFound(_)));
    }

    #[test]
    fn test_day_status_colors() {
        assert_eq!(day_status_color_filter("major"), "red");
        assert_eq!(day_status_color_filter("degraded"), "red");
        assert_eq!(day_status_color_filter("partial"), "yellow");
        assert_eq!(day_status_color_filter("maintenance"), "yellow");
        assert_eq!(day_status_color_filter("investigating"), "yellow");
        assert_eq!(day_status_color_filter("operational"), "green");
    }
}
