use axum::{routing::get, Router};

use crate::features::pages::handlers::index;

/// Create routes for the pages feature
pub fn routes() -> Router {
    Router::new().route("/", get(index))
}
