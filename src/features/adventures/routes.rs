use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::adventures::handlers::random_adventures;
use crate::features::adventures::services::AdventureService;

/// Create routes for the adventures feature
pub fn routes(adventure_service: Arc<AdventureService>) -> Router {
    Router::new()
        .route("/hx/random-adventures", get(random_adventures))
        .with_state(adventure_service)
}
