//! Common routes: health, version and the OpenAPI document.

use crate::docs::openapi;
use crate::handlers::status::{health, version};
use axum::{routing::get, Json, Router};

/// GET /health, GET /version, GET /api-docs/openapi.json. No state required.
pub fn common_routes() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/version", get(version))
        .route("/api-docs/openapi.json", get(|| async { Json(openapi()) }))
}
