//! Shared test harness: a server state over a throwaway database plus
//! request helpers that drive the real router in-process.

// Each test binary uses a different slice of this module
#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use satrack_server::auth::JwtConfig;
use satrack_server::db::DbService;
use satrack_server::{Config, ServerState, build_app};
use serde_json::{Value, json};
use tower::ServiceExt;

pub struct TestApp {
    pub app: Router,
    pub state: ServerState,
    _tmp: tempfile::TempDir,
}

pub fn test_config(data_dir: &str) -> Config {
    Config {
        http_port: 0,
        data_dir: data_dir.to_string(),
        client_url: None,
        environment: "test".to_string(),
        jwt: JwtConfig {
            secret: "integration-test-secret-key-32chars!".to_string(),
            expiration_minutes: 60,
            issuer: "satrack-server".to_string(),
            audience: "satrack-dashboard".to_string(),
        },
        smtp: None,
    }
}

pub async fn spawn_app() -> TestApp {
    let tmp = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = tmp.path().join("satrack.db");
    let db_service = DbService::new(&db_path.to_string_lossy())
        .await
        .expect("Failed to open test database");

    let config = test_config(&tmp.path().to_string_lossy());
    let state = ServerState::with_db(config, db_service.db);

    TestApp {
        app: build_app(state.clone()),
        state,
        _tmp: tmp,
    }
}

/// Fire one request at the router and decode the JSON response body
pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("Failed to build request"),
        None => builder.body(Body::empty()).expect("Failed to build request"),
    };

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Router call failed");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}

/// Sign up a fresh account and return its session token
pub async fn signup_and_token(app: &Router) -> String {
    let (status, body) = request(
        app,
        "POST",
        "/api/users",
        None,
        Some(json!({
            "username": "owner",
            "email": "owner@example.com",
            "password": "s3cret-pass",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "signup failed: {body}");
    body["token"]
        .as_str()
        .expect("signup response has no token")
        .to_string()
}
