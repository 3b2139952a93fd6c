//! Standard response envelope helpers.

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SuccessBody<T> {
    pub status: u16,
    pub success: bool,
    pub message: String,
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct FailureBody {
    pub status: u16,
    pub success: bool,
    pub message: String,
}

/// Canonical reason phrase for a status, e.g. "Not Found".
pub fn reason_phrase(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("Unknown Status")
}

/// Wrap `data` in a success envelope. `None` serializes as `null`.
pub fn success<T: Serialize>(
    status: StatusCode,
    message: impl Into<String>,
    data: T,
) -> (StatusCode, Json<SuccessBody<T>>) {
    (
        status,
        Json(SuccessBody {
            status: status.as_u16(),
            success: true,
            message: message.into(),
            data,
        }),
    )
}

pub fn success_ok<T: Serialize>(data: T) -> (StatusCode, Json<SuccessBody<T>>) {
    success(StatusCode::OK, reason_phrase(StatusCode::OK), data)
}

pub fn success_created<T: Serialize>(data: T) -> (StatusCode, Json<SuccessBody<T>>) {
    success(StatusCode::CREATED, reason_phrase(StatusCode::CREATED), data)
}

/// Failure envelope; never carries a `data` key.
pub fn failure(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<FailureBody>) {
    (
        status,
        Json(FailureBody {
            status: status.as_u16(),
            success: false,
            message: message.into(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_serializes_missing_data_as_null() {
        let (status, Json(body)) = success_ok(Option::<String>::None);
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "status": 200, "success": true, "message": "OK", "data": null })
        );
    }

    #[test]
    fn created_uses_reason_phrase() {
        let (status, Json(body)) = success_created(json!({ "a": 1 }));
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body.message, "Created");
        assert_eq!(body.data["a"], 1);
    }

    #[test]
    fn failure_has_no_data_key() {
        let (status, Json(body)) = failure(StatusCode::FORBIDDEN, "data is missing");
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "status": 403, "success": false, "message": "data is missing" })
        );
    }
}
