//! Shared helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use drawtrack_api::auth::jwt::{generate_access_token, JwtConfig};
use drawtrack_api::config::ServerConfig;
use drawtrack_api::router::build_app_router;
use drawtrack_api::state::AppState;
use drawtrack_core::blob::LocalBlobStore;

/// Shared JWT secret for test tokens.
const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(blob_root: &std::path::Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        blob_root: blob_root.display().to_string(),
        blob_public_base_url: "http://localhost:3000/files".to_string(),
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool and a temporary blob-store root.
///
/// This goes through `build_app_router` so integration tests exercise
/// the same middleware stack that production uses. The returned
/// `TempDir` keeps the blob root alive for the duration of the test.
pub fn build_test_app(pool: PgPool) -> (Router, tempfile::TempDir) {
    let blob_dir = tempfile::tempdir().expect("create blob tempdir");
    let config = test_config(blob_dir.path());

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        blob_store: Arc::new(LocalBlobStore::new(
            config.blob_root.clone(),
            config.blob_public_base_url.clone(),
        )),
    };

    (build_app_router(state, &config), blob_dir)
}

/// Mint a bearer token for a test editor.
pub fn editor_token(editor_id: i64, editor_name: &str) -> String {
    let config = JwtConfig {
        secret: TEST_JWT_SECRET.to_string(),
        access_token_expiry_mins: 60,
    };
    generate_access_token(editor_id, editor_name, &config).expect("mint test token")
}

/// Issue a GET request against the app.
pub async fn get(app: Router, path: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(path)
            .body(Body::empty())
            .expect("build request"),
    )
    .await
    .expect("send request")
}

/// Collect a response body into parsed JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("parse body as JSON")
}

/// Assert a response status and return its JSON body.
pub async fn expect_json(response: Response<Body>, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}

/// Multipart boundary used by [`multipart_request`].
pub const BOUNDARY: &str = "drawtrack-test-boundary";

/// Build a multipart/form-data body from `(name, filename, bytes)` parts.
pub fn multipart_body(parts: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, filename, bytes) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match filename {
            Some(filename) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: application/pdf\r\n\r\n"
                    )
                    .as_bytes(),
                );
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
            }
        }
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Build an authenticated multipart POST request.
pub fn multipart_request(path: &str, token: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body))
        .expect("build multipart request")
}
