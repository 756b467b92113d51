use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower::ServiceBuilder;
use axum::extract::DefaultBodyLimit;
use std::sync::Arc;

use crate::RooftopAnalyzer;
use super::handlers::*;

/// Upload limit for a single rooftop image
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

pub fn create_router(analyzer: RooftopAnalyzer) -> Router {
    Router::new()
        .route("/api/analyze", post(analyze_upload))
        .route("/api/config", get(get_config))
        .layer(
            ServiceBuilder::new()
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
                .layer(CorsLayer::permissive())
        )
        .with_state(Arc::new(analyzer))
}
