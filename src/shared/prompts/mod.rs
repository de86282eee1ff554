//! Prompt construction for the generative model.
//!
//! Each prompt is a `.jinja` template under `templates/prompts/`; the
//! functions here bind the request values to the template variables.
//!
//! # Usage
//!
//! ```ignore
//! use crate::shared::prompts::render_scene_prompt;
//!
//! let prompt = render_scene_prompt("underwater-temple", "golden-hour", "treasure hunt")?;
//! ```

use minijinja::context;

use crate::shared::templates::{render_template, TemplateError};

/// Fixed instruction sent alongside the uploaded photo
pub fn render_analysis_prompt() -> Result<String, TemplateError> {
    render_template("prompts/analysis.jinja", context! {})
}

/// Figurine prompt built from the photo description
pub fn render_figurine_prompt(description: &str) -> Result<String, TemplateError> {
    render_template(
        "prompts/figurine.jinja",
        context! { description => description },
    )
}

/// Background scene prompt.
///
/// # Arguments
/// * `theme` - Scene theme, e.g. "underwater-temple"
/// * `time_of_day` - Lighting condition, e.g. "golden-hour"
/// * `prompt` - Free-form extra details, may be empty
pub fn render_scene_prompt(
    theme: &str,
    time_of_day: &str,
    prompt: &str,
) -> Result<String, TemplateError> {
    render_template(
        "prompts/scene.jinja",
        context! { theme => theme, time_of_day => time_of_day, prompt => prompt },
    )
}

/// Fixed composition instruction. Image 1 is the background, image 2 the figurine.
pub fn render_composition_prompt() -> Result<String, TemplateError> {
    render_template("prompts/composition.jinja", context! {})
}

pub fn render_caption_prompt(scene: &str) -> Result<String, TemplateError> {
    render_template("prompts/caption.jinja", context! { scene => scene })
}

/// Request for four pipe-delimited adventure ideas
pub fn render_adventures_prompt() -> Result<String, TemplateError> {
    render_template("prompts/adventures.jinja", context! {})
}
