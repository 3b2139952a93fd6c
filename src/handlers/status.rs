//! Store status, health and version.

use crate::error::AppError;
use crate::response::{success_ok, SuccessBody};
use crate::state::AppState;
use crate::store::StoreStatus;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthBody {
    status: &'static str,
}

/// GET /api/v1/status
pub async fn store_status(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SuccessBody<StoreStatus>>), AppError> {
    let status = state.store.status().await?;
    Ok(success_ok(status))
}

pub async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

pub async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Fallback for unknown routes.
pub async fn not_found() -> AppError {
    AppError::NotFound
}

/// Fallback for a known path called with a method it does not serve.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
