//! Extract an object body, rejecting with the standard failure envelope.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::{header, StatusCode},
    Form, Json,
};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Request body as a JSON object.
///
/// `application/x-www-form-urlencoded` bodies are accepted too, every field as a string.
/// A request with neither content type yields an empty object, so missing fields are
/// reported by validation rather than by the extractor.
#[derive(Clone, Debug, Default)]
pub struct JsonBody(pub Map<String, Value>);

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.trim_start().starts_with("application/x-www-form-urlencoded"))
}

fn rejected(status: StatusCode, body_text: String) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::BadRequest(body_text)
    }
}

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|r| rejected(r.status(), r.body_text()))?;
            let map = fields.into_iter().map(|(k, v)| (k, Value::String(v))).collect();
            return Ok(JsonBody(map));
        }
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(Value::Object(map))) => Ok(JsonBody(map)),
            Ok(Json(_)) => Err(AppError::BadRequest("body must be a JSON object".into())),
            Err(JsonRejection::MissingJsonContentType(_)) => Ok(JsonBody::default()),
            Err(rejection) => Err(rejected(rejection.status(), rejection.body_text())),
        }
    }
}
