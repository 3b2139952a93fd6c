//! End-to-end tests through the full router against the in-memory store.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use employee_api::{app, AppState, MemoryStore, UpdateMode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const LIMIT: usize = 100 * 1024;

fn router(mode: UpdateMode) -> Router {
    app(AppState::new(Arc::new(MemoryStore::new()), mode), LIMIT)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    match body {
        Some(v) => send_raw(app, method, uri, "application/json", v.to_string()).await,
        None => dispatch(app, Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()).await,
    }
}

/// Send a body with an explicit content type and a `Content-Length`, the way hyper
/// delivers a client request.
async fn send_raw(app: &Router, method: Method, uri: &str, content_type: &str, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .unwrap();
    dispatch(app, request).await
}

async fn dispatch(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

fn employee_body(email: &str) -> Value {
    json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "employeeEmail": email,
        "employeePhoneNumber": "555-0100",
        "departmentId": "d1",
        "roleId": "r1",
        "address": "12 St James's Square",
        "dateOfBirth": "1815-12-10",
    })
}

#[tokio::test]
async fn department_lifecycle() {
    let app = router(UpdateMode::Replace);

    let (status, created) = send(&app, Method::POST, "/api/v1/departments", Some(json!({ "departmentName": "Engineering" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], 201);
    assert_eq!(created["success"], true);
    assert_eq!(created["message"], "Created");
    assert_eq!(created["data"]["departmentName"], "Engineering");
    let id = created["data"]["_id"].as_str().unwrap().to_string();

    let (status, dup) = send(&app, Method::POST, "/api/v1/departments", Some(json!({ "departmentName": "Engineering" }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(dup, json!({ "status": 403, "success": false, "message": "department is already exists" }));

    let (status, found) = send(&app, Method::GET, "/api/v1/departments?departmentName=Engineering", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found["data"], created["data"]);

    let (status, deleted) = send(&app, Method::DELETE, &format!("/api/v1/departments/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["data"], json!({}));

    let (status, gone) = send(&app, Method::GET, &format!("/api/v1/departments/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(gone, json!({ "status": 404, "success": false, "message": "Not Found" }));
}

#[tokio::test]
async fn missing_required_fields_are_forbidden_and_not_persisted() {
    let app = router(UpdateMode::Replace);
    let cases = [
        ("/api/v1/departments", json!({})),
        ("/api/v1/roles", json!({ "roleName": "dev" })),
        ("/api/v1/projects", json!({ "projectName": "p", "projectDescription": "d", "startDate": "2024-01-01" })),
        ("/api/v1/employees", json!({ "firstName": "Ada", "lastName": "" })),
        ("/api/v1/employees-reviews", json!({ "review": "fine" })),
    ];
    for (path, body) in cases {
        let (status, value) = send(&app, Method::POST, path, Some(body)).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{path}");
        assert_eq!(value["message"], "data is missing", "{path}");
        assert!(value.get("data").is_none());

        let (_, listed) = send(&app, Method::GET, path, None).await;
        assert_eq!(listed["data"], json!([]), "{path}");
    }
}

#[tokio::test]
async fn post_without_content_type_is_missing_data() {
    let app = router(UpdateMode::Replace);
    let (status, value) = send(&app, Method::POST, "/api/v1/roles", None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(value["message"], "data is missing");
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let app = router(UpdateMode::Replace);
    let (status, value) = send_raw(&app, Method::POST, "/api/v1/departments", "application/json", "{not json".into()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["success"], false);

    let (status, value) = send(&app, Method::POST, "/api/v1/departments", Some(json!(["x"]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["success"], false);

    let mut body = employee_body("bad-date@example.com");
    body["dateOfBirth"] = json!("someday");
    let (status, _) = send(&app, Method::POST, "/api/v1/employees", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unique_keys_per_resource() {
    let app = router(UpdateMode::Replace);
    let cases = [
        ("/api/v1/roles", json!({ "roleName": "dev", "roleDescription": "builds" }), "role name is already exists"),
        (
            "/api/v1/projects",
            json!({
                "projectName": "Atlas",
                "projectDescription": "maps",
                "startDate": "2024-01-01",
                "endDate": "2024-06-30",
                "projectStatus": "active",
            }),
            "Project name is already exist",
        ),
        ("/api/v1/employees", employee_body("ada@example.com"), "the employee is already exist"),
    ];
    for (path, body, message) in cases {
        let (status, _) = send(&app, Method::POST, path, Some(body.clone())).await;
        assert_eq!(status, StatusCode::CREATED, "{path}");
        let (status, value) = send(&app, Method::POST, path, Some(body)).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{path}");
        assert_eq!(value["message"], message);
    }
}

#[tokio::test]
async fn create_round_trips_through_get() {
    let app = router(UpdateMode::Replace);
    let (_, created) = send(&app, Method::POST, "/api/v1/employees", Some(employee_body("grace@example.com"))).await;
    let data = &created["data"];
    assert_eq!(data["isEmployeeActive"], true);
    assert_eq!(data["dateOfBirth"], "1815-12-10T00:00:00.000Z");
    assert!(data["createdAt"].is_string());
    assert!(data["updatedAt"].is_string());

    let id = data["_id"].as_str().unwrap();
    let (status, fetched) = send(&app, Method::GET, &format!("/api/v1/employees/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&fetched["data"], data);
}

#[tokio::test]
async fn employee_lookup_by_name() {
    let app = router(UpdateMode::Replace);
    send(&app, Method::POST, "/api/v1/employees", Some(employee_body("ada@example.com"))).await;

    let (status, found) = send(&app, Method::GET, "/api/v1/employees?firstName=Ada&lastName=Lovelace", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found["data"]["employeeEmail"], "ada@example.com");

    let (status, value) = send(&app, Method::GET, "/api/v1/employees?firstName=Ada", None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(value["message"], "data is missing");

    let (status, _) = send(&app, Method::GET, "/api/v1/employees?firstName=Alan&lastName=Turing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, all) = send(&app, Method::GET, "/api/v1/employees", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn malformed_id_reads_as_not_found() {
    let app = router(UpdateMode::Replace);
    for path in ["/api/v1/departments/zzz", "/api/v1/roles/123", "/api/v1/projects/abc", "/api/v1/employees/x"] {
        let (status, _) = send(&app, Method::GET, path, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{path}");
        let (status, _) = send(&app, Method::DELETE, path, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{path}");
    }
}

#[tokio::test]
async fn update_replaces_named_fields_and_is_repeatable() {
    let app = router(UpdateMode::Replace);
    let (_, created) = send(
        &app,
        Method::POST,
        "/api/v1/roles",
        Some(json!({ "roleName": "dev", "roleDescription": "builds things" })),
    )
    .await;
    let id = created["data"]["_id"].as_str().unwrap().to_string();
    let uri = format!("/api/v1/roles/{id}");

    let (status, first) = send(&app, Method::PUT, &uri, Some(json!({ "roleName": "engineer" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["data"]["roleName"], "engineer");
    assert_eq!(first["data"]["roleDescription"], Value::Null);
    assert_eq!(first["data"]["createdAt"], created["data"]["createdAt"]);

    let (_, second) = send(&app, Method::PUT, &uri, Some(json!({ "roleName": "engineer" }))).await;
    let strip = |v: &Value| {
        let mut v = v["data"].clone();
        v.as_object_mut().unwrap().remove("updatedAt");
        v
    };
    assert_eq!(strip(&first), strip(&second));

    let (_, fetched) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(fetched["data"], second["data"]);
}

#[tokio::test]
async fn merge_mode_keeps_omitted_fields() {
    let app = router(UpdateMode::Merge);
    let (_, created) = send(
        &app,
        Method::POST,
        "/api/v1/roles",
        Some(json!({ "roleName": "dev", "roleDescription": "builds things" })),
    )
    .await;
    let id = created["data"]["_id"].as_str().unwrap();
    let (_, updated) = send(&app, Method::PUT, &format!("/api/v1/roles/{id}"), Some(json!({ "roleName": "sre" }))).await;
    assert_eq!(updated["data"]["roleName"], "sre");
    assert_eq!(updated["data"]["roleDescription"], "builds things");
}

#[tokio::test]
async fn update_and_delete_by_natural_key() {
    let app = router(UpdateMode::Replace);
    send(&app, Method::POST, "/api/v1/departments", Some(json!({ "departmentName": "Sales" }))).await;

    let (status, updated) = send(
        &app,
        Method::PUT,
        "/api/v1/departments?departmentName=Sales",
        Some(json!({ "departmentName": "Revenue" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["departmentName"], "Revenue");

    let (status, _) = send(&app, Method::DELETE, "/api/v1/departments?departmentName=Sales", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::DELETE, "/api/v1/departments?departmentName=Revenue", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::PUT, "/api/v1/departments", Some(json!({ "departmentName": "x" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn employee_update_uses_renamed_name_fields() {
    let app = router(UpdateMode::Replace);
    let (_, created) = send(&app, Method::POST, "/api/v1/employees", Some(employee_body("ada@example.com"))).await;
    let id = created["data"]["_id"].as_str().unwrap();

    let mut body = employee_body("countess@example.com");
    body["firstNameUpdate"] = json!("Augusta");
    body["lastNameUpdate"] = json!("King");
    let (status, updated) = send(&app, Method::PUT, &format!("/api/v1/employees/{id}"), Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["firstName"], "Augusta");
    assert_eq!(updated["data"]["lastName"], "King");
    assert_eq!(updated["data"]["employeeEmail"], "countess@example.com");
    assert_eq!(updated["data"]["isEmployeeActive"], true);
}

#[tokio::test]
async fn project_update_requires_some_change() {
    let app = router(UpdateMode::Replace);
    let (status, value) = send(
        &app,
        Method::PUT,
        "/api/v1/projects/00000000-0000-0000-0000-000000000000",
        Some(json!({ "projectDescription": "only this" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(value["message"], "data is missing");
}

#[tokio::test]
async fn reviews_validate_ids() {
    let app = router(UpdateMode::Replace);

    let (status, value) = send(
        &app,
        Method::POST,
        "/api/v1/employees-reviews",
        Some(json!({ "employeeId": "not-an-id", "review": "ok" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(value["message"], "employee id is not valid");

    for method in [Method::GET, Method::DELETE] {
        let (status, value) = send(&app, method, "/api/v1/employees-reviews/bogus", None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(value["message"], "review id is not valid");
    }

    let (status, value) = send(&app, Method::PUT, "/api/v1/employees-reviews/bogus", Some(json!({}))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(value["message"], "data is missing");

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/v1/employees-reviews/00000000-0000-0000-0000-000000000000",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, value) = send(&app, Method::GET, "/api/v1/employees/nope/reviews", None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(value["message"], "employee id is not valid");
}

#[tokio::test]
async fn reviews_by_owner() {
    let app = router(UpdateMode::Replace);
    let (_, employee) = send(&app, Method::POST, "/api/v1/employees", Some(employee_body("ada@example.com"))).await;
    let owner = employee["data"]["_id"].as_str().unwrap().to_string();
    // Owner existence is not checked, only id format.
    let stranger = "3f2b1c4d-0000-4000-8000-000000000001";

    for (employee_id, text) in [(owner.as_str(), "great"), (stranger, "who?"), (owner.as_str(), "again")] {
        let (status, created) = send(
            &app,
            Method::POST,
            "/api/v1/employees-reviews",
            Some(json!({ "employeeId": employee_id, "review": text })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["data"]["employeeId"], employee_id);
    }

    let (status, reviews) = send(&app, Method::GET, &format!("/api/v1/employees/{owner}/reviews"), None).await;
    assert_eq!(status, StatusCode::OK);
    let texts: Vec<&str> = reviews["data"].as_array().unwrap().iter().map(|r| r["review"].as_str().unwrap()).collect();
    assert_eq!(texts, vec!["great", "again"]);

    let nobody = "3f2b1c4d-0000-4000-8000-000000000002";
    let (status, empty) = send(&app, Method::GET, &format!("/api/v1/employees/{nobody}/reviews"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(empty["data"], json!([]));

    let first_id = reviews["data"][0]["_id"].as_str().unwrap().to_string();
    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/employees-reviews/{first_id}"),
        Some(json!({ "review": "outstanding", "employeeId": stranger })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["review"], "outstanding");
    assert_eq!(updated["data"]["employeeId"], owner.as_str());
}

#[tokio::test]
async fn status_health_and_unknown_routes() {
    let app = router(UpdateMode::Replace);

    let (status, value) = send(&app, Method::GET, "/api/v1/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["data"], json!({ "store": "memory", "state": "connected" }));

    let (status, value) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value, json!({ "status": "ok" }));

    let (status, value) = send(&app, Method::GET, "/api/v1/nothing-here", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(value["success"], false);

    let (status, value) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["info"]["title"], "Employee Management API");
}

#[tokio::test]
async fn oversized_body_is_rejected_with_envelope() {
    let app = app(AppState::new(Arc::new(MemoryStore::new()), UpdateMode::Replace), 64);
    let (status, value) = send(
        &app,
        Method::POST,
        "/api/v1/departments",
        Some(json!({ "departmentName": "x".repeat(200) })),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(value, json!({ "status": 413, "success": false, "message": "Payload Too Large" }));

    let (status, value) = send_raw(
        &app,
        Method::POST,
        "/api/v1/departments",
        "application/x-www-form-urlencoded",
        format!("departmentName={}", "x".repeat(200)),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(value["success"], false);

    let (status, _) = send(&app, Method::POST, "/api/v1/departments", Some(json!({ "departmentName": "Ops" }))).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn numeric_and_epoch_values_are_coerced() {
    let app = router(UpdateMode::Replace);
    let mut body = employee_body("ada@example.com");
    body["employeePhoneNumber"] = json!(5550100);
    body["dateOfBirth"] = json!(1_724_325_610_791_i64);

    let (status, created) = send(&app, Method::POST, "/api/v1/employees", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["employeePhoneNumber"], "5550100");
    assert_eq!(created["data"]["dateOfBirth"], "2024-08-22T11:20:10.791Z");

    let id = created["data"]["_id"].as_str().unwrap().to_string();
    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/employees/{}", id),
        Some(json!({ "employeePhoneNumber": 42, "address": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["employeePhoneNumber"], "42");
    assert_eq!(updated["data"]["address"], "false");

    let (status, value) = send(
        &app,
        Method::POST,
        "/api/v1/roles",
        Some(json!({ "roleName": ["lead"], "roleDescription": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["success"], false);
}

#[tokio::test]
async fn form_encoded_bodies_are_accepted() {
    let app = router(UpdateMode::Replace);
    let form = "application/x-www-form-urlencoded";

    let (status, created) = send_raw(&app, Method::POST, "/api/v1/departments", form, "departmentName=Engineering".into()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["departmentName"], "Engineering");
    let id = created["data"]["_id"].as_str().unwrap().to_string();

    let (status, updated) = send_raw(
        &app,
        Method::PUT,
        &format!("/api/v1/departments/{}", id),
        form,
        "departmentName=Research+%26+Development".into(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["departmentName"], "Research & Development");

    let (status, value) = send_raw(&app, Method::POST, "/api/v1/departments", form, "departmentName=".into()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(value["message"], "data is missing");
}

#[tokio::test]
async fn unsupported_methods_get_envelope() {
    let app = router(UpdateMode::Replace);
    let expected = json!({ "status": 405, "success": false, "message": "Method Not Allowed" });

    let (status, value) = send(&app, Method::PUT, "/api/v1/employees-reviews", Some(json!({ "review": "x" }))).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(value, expected);

    let (status, value) = send(&app, Method::POST, "/api/v1/employees/abc/reviews", Some(json!({}))).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(value, expected);

    let (status, value) = send(&app, Method::PATCH, "/api/v1/departments", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(value, expected);
}
