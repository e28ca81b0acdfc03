//! Shared helpers for API integration tests.
//!
//! Requests are sent straight through the router with `tower::ServiceExt`,
//! no TCP listener involved, and the router carries the same middleware
//! stack as production via [`build_app_router`].

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use rentora_api::config::ServerConfig;
use rentora_api::router::build_app_router;
use rentora_api::state::AppState;
use rentora_api::storage::LocalDiskStore;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(upload_dir: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3001".to_string()],
        request_timeout_secs: 30,
        upload_dir: upload_dir.to_string(),
    }
}

/// Build the full application router backed by the given pool, writing
/// uploads to a throwaway directory.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_upload_dir(pool, &fresh_upload_dir())
}

/// Same as [`build_test_app`] but with an explicit upload directory, for
/// tests that inspect what landed on disk.
pub fn build_test_app_with_upload_dir(pool: PgPool, upload_dir: &str) -> Router {
    let config = test_config(upload_dir);
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        upload_store: Arc::new(LocalDiskStore::new(upload_dir)),
    };
    build_app_router(state, &config)
}

/// A unique directory under the system temp dir for one test's uploads.
pub fn fresh_upload_dir() -> String {
    let dir = std::env::temp_dir().join(format!(
        "rentora-test-uploads-{}-{:09}",
        std::process::id(),
        rand_suffix()
    ));
    dir.to_string_lossy().into_owned()
}

fn rand_suffix() -> u128 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::patch(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::delete(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Build a multipart/form-data request with the given `(field, filename,
/// bytes)` parts and send it.
pub async fn post_multipart(
    app: Router,
    uri: &str,
    parts: &[(&str, &str, &[u8])],
) -> Response<Body> {
    const BOUNDARY: &str = "------------------------rentora-test";

    let mut body = Vec::new();
    for (field, filename, bytes) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    app.oneshot(
        Request::post(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// A valid create payload; tests tweak individual fields as needed.
pub fn sample_listing() -> serde_json::Value {
    serde_json::json!({
        "unitName": "Palm Hills Loft",
        "unitNumber": "A-101",
        "project": "Palm Hills",
        "description": "Bright corner unit",
        "address": "12 Nile Street",
        "city": "Giza",
        "price": 1500.0,
        "bedrooms": 2,
        "bathrooms": 1,
        "area": 95.5
    })
}

/// Assert the standard error body shape and return it.
pub async fn error_body(response: Response<Body>, expected: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), expected);
    let json = body_json(response).await;
    assert!(json["error"].is_string(), "missing error message: {json}");
    assert!(json["code"].is_string(), "missing error code: {json}");
    json
}
