//! Generic resource handlers: list, create, read, update, delete. Each is instantiated per
//! resource type by the router.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::model::Resource;
use crate::response::{success_created, success_ok};
use crate::service::{RequestValidator, ResourceService};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::collections::HashMap;

/// GET /<collection>: single document when a natural key is in the query, else the whole
/// collection.
pub async fn list<R: Resource>(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, AppError> {
    if RequestValidator::has_natural_key(&params, R::NATURAL_KEY) {
        let record = ResourceService::find::<R>(state.store.as_ref(), None, &params).await?;
        return Ok(success_ok(record).into_response());
    }
    let records = ResourceService::list::<R>(state.store.as_ref()).await?;
    Ok(success_ok(records).into_response())
}

pub async fn create<R: Resource>(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let record = ResourceService::create::<R>(state.store.as_ref(), body).await?;
    Ok(success_created(record))
}

pub async fn read<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let record = ResourceService::find::<R>(state.store.as_ref(), Some(&id), &params).await?;
    Ok(success_ok(record))
}

pub async fn update<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let record = ResourceService::update::<R>(state.store.as_ref(), Some(&id), &params, body, state.update_mode).await?;
    Ok(success_ok(record))
}

/// PUT /<collection>?<natural key>
pub async fn update_by_key<R: Resource>(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let record = ResourceService::update::<R>(state.store.as_ref(), None, &params, body, state.update_mode).await?;
    Ok(success_ok(record))
}

pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    ResourceService::delete::<R>(state.store.as_ref(), Some(&id), &params).await?;
    Ok(success_ok(json!({})))
}

/// DELETE /<collection>?<natural key>
pub async fn delete_by_key<R: Resource>(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    ResourceService::delete::<R>(state.store.as_ref(), None, &params).await?;
    Ok(success_ok(json!({})))
}
