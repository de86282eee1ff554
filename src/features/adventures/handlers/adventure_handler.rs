use axum::{extract::State, response::Html};
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::adventures::services::AdventureService;
use crate::shared::templates::render_adventures;

/// Four adventure buttons for the quick-start grid
pub async fn random_adventures(
    State(service): State<Arc<AdventureService>>,
) -> Result<Html<String>> {
    let adventures = service.generate().await;
    Ok(Html(render_adventures(&adventures)?))
}
