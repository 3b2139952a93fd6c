mod api;
mod common;

pub use api::api_routes;
pub use common::common_routes;

use crate::handlers::status::not_found;
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, Router};
use tower_http::trace::TraceLayer;

/// Full application: common routes, `/api/v1`, a 404 envelope fallback, body limit and
/// request tracing.
///
/// The limit is enforced by the body extractors, so an oversized request is answered with
/// the 413 failure envelope whether or not it declares a `Content-Length`.
pub fn app(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .merge(common_routes())
        .nest("/api/v1", api_routes(state))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
}
