//! Template engine for prompts and HTML fragments using Jinja2 syntax.
//!
//! Templates are compiled into the binary and registered once in a global
//! environment. Names ending in `.html` are auto-escaped by minijinja, so
//! every value interpolated into markup is HTML-escaped; `.jinja` prompt
//! templates are rendered verbatim.

use minijinja::{Environment, Value};
use std::sync::OnceLock;
use thiserror::Error;

/// Global template environment
static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// Embedded templates, keyed by their path relative to `templates/`
const TEMPLATES: &[(&str, &str)] = &[
    ("index.html", include_str!("../../../templates/index.html")),
    (
        "fragments/figurine_success.html",
        include_str!("../../../templates/fragments/figurine_success.html"),
    ),
    (
        "fragments/scene_success.html",
        include_str!("../../../templates/fragments/scene_success.html"),
    ),
    (
        "fragments/composition_success.html",
        include_str!("../../../templates/fragments/composition_success.html"),
    ),
    (
        "fragments/error.html",
        include_str!("../../../templates/fragments/error.html"),
    ),
    (
        "fragments/adventures.html",
        include_str!("../../../templates/fragments/adventures.html"),
    ),
    (
        "prompts/analysis.jinja",
        include_str!("../../../templates/prompts/analysis.jinja"),
    ),
    (
        "prompts/figurine.jinja",
        include_str!("../../../templates/prompts/figurine.jinja"),
    ),
    (
        "prompts/scene.jinja",
        include_str!("../../../templates/prompts/scene.jinja"),
    ),
    (
        "prompts/composition.jinja",
        include_str!("../../../templates/prompts/composition.jinja"),
    ),
    (
        "prompts/caption.jinja",
        include_str!("../../../templates/prompts/caption.jinja"),
    ),
    (
        "prompts/adventures.jinja",
        include_str!("../../../templates/prompts/adventures.jinja"),
    ),
];

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();

    for &(name, source) in TEMPLATES {
        if let Err(e) = env.add_template(name, source) {
            tracing::warn!("Failed to load template {}: {}", name, e);
        } else {
            tracing::debug!("Loaded template: {}", name);
        }
    }

    env
}

/// Get the global template environment
fn get_environment() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(init_environment)
}

/// Render a template with the given context.
///
/// # Example
/// ```ignore
/// use minijinja::context;
///
/// let html = render_template("fragments/error.html", context! {
///     result_id => "scene-result",
///     message => "Failed to generate scene",
/// })?;
/// ```
pub fn render_template(template_name: &str, ctx: Value) -> Result<String, TemplateError> {
    let template = get_environment()
        .get_template(template_name)
        .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

    template
        .render(ctx)
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}

/// Check if a template exists
#[allow(dead_code)]
pub fn template_exists(template_name: &str) -> bool {
    get_environment().get_template(template_name).is_ok()
}

/// List all available templates
#[allow(dead_code)]
pub fn list_templates() -> Vec<String> {
    get_environment()
        .templates()
        .map(|(name, _)| name.to_string())
        .collect()
}
