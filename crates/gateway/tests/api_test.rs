//! HTTP API tests.
//!
//! Drive the full router (CORS, tracing, handlers, endpoint layer, service,
//! repository) against an in-memory SQLite database.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt; // For oneshot()

use common::DatabaseConfig;
use gateway_lib::config::GatewayConfig;
use gateway_lib::routes::create_router;
use user_service_lib::infra::Database;

async fn test_app_with(config: GatewayConfig) -> Router {
    let db = Database::connect(&DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
    })
    .await
    .unwrap();

    create_router(gateway_lib::build_state(db, config))
}

async fn test_app() -> Router {
    test_app_with(GatewayConfig::default()).await
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

async fn create(app: &Router, first_name: &str, last_name: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/users",
        Some(json!({"first_name": first_name, "last_name": last_name})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_create_returns_201_envelope() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/users",
        Some(json!({"first_name": "Ann", "last_name": "Lee", "email": "ann@example.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], 201);
    assert_eq!(body["message"], "Success");
    assert!(!body["data"]["id"].as_str().unwrap().is_empty());
    assert_eq!(body["data"]["email"], "ann@example.com");
    assert!(body.get("err").is_none());
}

#[tokio::test]
async fn test_create_missing_first_name_is_400() {
    let app = test_app().await;

    let (status, body) = send(&app, "POST", "/users", Some(json!({"last_name": "Lee"}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert_eq!(body["err"], "first name is required");
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let app = test_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/users")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["err"]
        .as_str()
        .unwrap()
        .starts_with("invalid request format"));
}

#[tokio::test]
async fn test_get_by_id() {
    let app = test_app().await;
    let id = create(&app, "Ann", "Lee").await;

    let (status, body) = send(&app, "GET", &format!("/users/{}", id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "successful user fetch");
    assert_eq!(body["data"]["id"], id.as_str());
    assert_eq!(body["data"]["first_name"], "Ann");
}

#[tokio::test]
async fn test_get_unknown_is_404() {
    let app = test_app().await;

    let (status, body) = send(&app, "GET", "/users/missing", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["err"], "user 'missing' doesn't exist");
}

#[tokio::test]
async fn test_get_blank_id_is_400() {
    let app = test_app().await;

    let (status, _) = send(&app, "GET", "/users/%20", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_empty_id_segment_is_400() {
    let app = test_app().await;
    create(&app, "Ann", "Lee").await;

    for method in ["GET", "DELETE"] {
        let (status, body) = send(&app, method, "/users/", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", method);
        assert_eq!(body["err"], "user id cannot be empty");
        assert!(body.get("data").is_none());
    }
}

#[tokio::test]
async fn test_list_filters_and_meta() {
    let app = test_app().await;
    for (first, last) in [("Ann", "Lee"), ("Joanna", "Kim"), ("ANNABEL", "Ray"), ("Ben", "Ode")] {
        create(&app, first, last).await;
    }

    let (status, body) = send(&app, "GET", "/users?first_name=ann", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
    assert_eq!(body["meta"]["total"], 3);
    assert_eq!(body["meta"]["page"], 1);
    assert_eq!(body["meta"]["limit"], 10);
    assert_eq!(body["meta"]["offset"], 0);
}

#[tokio::test]
async fn test_list_last_page() {
    let app = test_app().await;
    for i in 0..25 {
        create(&app, &format!("User{}", i), "Test").await;
    }

    let (status, body) = send(&app, "GET", "/users?limit=10&page=3", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
    assert_eq!(body["meta"]["total"], 25);
    assert_eq!(body["meta"]["offset"], 20);
    assert_eq!(body["meta"]["page_count"], 3);
}

#[tokio::test]
async fn test_list_huge_page_is_empty_not_a_crash() {
    let app = test_app().await;
    create(&app, "Ann", "Lee").await;

    for uri in [
        "/users?page=9223372036854775807",
        "/users?limit=9223372036854775807&page=3",
    ] {
        let (status, body) = send(&app, "GET", uri, None).await;

        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert!(body["data"].as_array().unwrap().is_empty(), "{}", uri);
        assert_eq!(body["meta"]["total"], 1);
        assert_eq!(body["meta"]["offset"], 9223372036854775807u64);
    }
}

#[tokio::test]
async fn test_list_by_last_name() {
    let app = test_app().await;
    for (first, last) in [("Ann", "Lee"), ("Bo", "Ashlee"), ("Cy", "Ray")] {
        create(&app, first, last).await;
    }

    let (status, body) = send(&app, "GET", "/users?last_name=LEE&first_name=a", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["data"][0]["last_name"], "Lee");
}

#[tokio::test]
async fn test_list_non_numeric_paging_uses_defaults() {
    let app = test_app().await;
    create(&app, "Ann", "Lee").await;

    let (status, body) = send(&app, "GET", "/users?limit=abc&page=-2", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["limit"], 10);
    assert_eq!(body["meta"]["page"], 1);
}

#[tokio::test]
async fn test_list_invalid_default_limit_is_500() {
    let mut config = GatewayConfig::default();
    config.pagination.default_limit = "0".to_string();
    let app = test_app_with(config).await;

    let (status, body) = send(&app, "GET", "/users", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], 500);

    // An explicit limit does not need the default.
    let (status, _) = send(&app, "GET", "/users?limit=5", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_patch_updates_present_fields_only() {
    let app = test_app().await;
    let id = create(&app, "Ann", "Lee").await;

    let (status, body) = send(
        &app,
        "PATCH",
        "/users",
        Some(json!({"id": id, "email": "new@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User updated successfully");
    assert_eq!(body["data"], json!({"id": id, "email": "new@example.com"}));

    let (_, body) = send(&app, "GET", &format!("/users/{}", id), None).await;
    assert_eq!(body["data"]["email"], "new@example.com");
    assert_eq!(body["data"]["first_name"], "Ann");
    assert_eq!(body["data"]["last_name"], "Lee");
}

#[tokio::test]
async fn test_patch_blank_id_is_400() {
    let app = test_app().await;

    let (status, body) = send(&app, "PATCH", "/users", Some(json!({"id": "   ", "email": "x"}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["err"], "user id cannot be empty");
}

#[tokio::test]
async fn test_patch_unknown_id_is_404() {
    let app = test_app().await;

    let (status, _) = send(
        &app,
        "PATCH",
        "/users",
        Some(json!({"id": "missing", "first_name": "Nobody"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_twice() {
    let app = test_app().await;
    let id = create(&app, "Ann", "Lee").await;

    let (status, body) = send(&app, "DELETE", &format!("/users/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User deleted successfully");
    assert_eq!(body["data"], id.as_str());

    let (status, _) = send(&app, "DELETE", &format!("/users/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health() {
    let app = test_app().await;

    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["database"]["status"], "healthy");
}

#[tokio::test]
async fn test_openapi_document_served() {
    let app = test_app().await;

    let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"].get("/users").is_some());
    assert!(body["paths"].get("/users/{id}").is_some());
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = test_app().await;

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/users")
        .header("origin", "http://example.com")
        .header("access-control-request-method", "PATCH")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
}
