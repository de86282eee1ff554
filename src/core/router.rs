use axum::{http::StatusCode, routing::get, Router};
use std::path::Path;
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::core::config::AppConfig;
use crate::core::middleware;
use crate::features::adventures::{routes as adventures_routes, AdventureService};
use crate::features::pages::routes as pages_routes;
use crate::features::studio::{routes as studio_routes, StudioService};

async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Assemble the application router with its middleware stack
pub fn build_router(
    app_config: &AppConfig,
    static_dir: &Path,
    studio_service: Arc<StudioService>,
    adventure_service: Arc<AdventureService>,
) -> Router {
    Router::new()
        .merge(pages_routes::routes())
        .merge(studio_routes::routes(
            studio_service,
            app_config.max_request_body_size,
        ))
        .merge(adventures_routes::routes(adventure_service))
        .route("/health", get(health_check))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(middleware::cors_layer(
            app_config.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
}
