use axum::response::Html;
use minijinja::context;

use crate::core::error::Result;
use crate::shared::templates::render_template;

pub const APP_TITLE: &str = "BananaVerse";

/// Full studio page
pub async fn index() -> Result<Html<String>> {
    let html = render_template("index.html", context! { title => APP_TITLE })?;
    Ok(Html(html))
}
