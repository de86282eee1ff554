use axum::{extract::DefaultBodyLimit, routing::post, Router};
use std::sync::Arc;

use crate::features::studio::handlers::{
    compose_scene, create_figurine, generate_caption, generate_scene,
};
use crate::features::studio::services::StudioService;

/// Create routes for the studio feature
pub fn routes(studio_service: Arc<StudioService>, max_upload_size: usize) -> Router {
    Router::new()
        .route(
            "/hx/figurine",
            post(create_figurine).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route("/hx/scene", post(generate_scene))
        .route("/hx/compose", post(compose_scene))
        .route("/hx/caption", post(generate_caption))
        .with_state(studio_service)
}
