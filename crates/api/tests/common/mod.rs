//! Shared test harness: builds the full application router with the
//! production middleware stack and provides request helpers.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use gangway_api::auth::jwt::JwtConfig;
use gangway_api::config::ServerConfig;
use gangway_api::engine::provisioner::{self, ProvisionRequest};
use gangway_api::router::build_app_router;
use gangway_api::state::AppState;
use gangway_core::catalog::{FieldKind, FormTypeDescriptor};
use gangway_core::identity::RandomEmployeeIdGenerator;
use gangway_db::identity::PgIdentityProvider;
use gangway_db::models::account::Account;

/// Password used for every account the harness provisions.
pub const TEST_PASSWORD: &str = "password-123";

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the application state with an optional artificial delay on the
/// identity provider's baseline-profile materialization.
pub fn build_test_state(pool: PgPool, materialization_delay: Option<Duration>) -> AppState {
    let identity = match materialization_delay {
        Some(delay) => PgIdentityProvider::with_materialization_delay(pool.clone(), delay),
        None => PgIdentityProvider::new(pool.clone()),
    };
    AppState {
        pool,
        config: Arc::new(test_config()),
        catalog: gangway_core::catalog::FormCatalog::standard(),
        identity: Arc::new(identity),
        employee_ids: Arc::new(RandomEmployeeIdGenerator),
    }
}

/// Build the full application router plus its state. Mirrors the router
/// construction in `main.rs` so integration tests exercise the same
/// middleware stack production uses.
pub fn build_test_app(pool: PgPool) -> (Router, AppState) {
    let state = build_test_state(pool, None);
    let app = build_app_router(state.clone(), &test_config());
    (app, state)
}

/// Like [`build_test_app`], with a materialization delay long enough to
/// force the provisioner's fallback-insert path.
pub fn build_test_app_with_delay(pool: PgPool, delay: Duration) -> (Router, AppState) {
    let state = build_test_state(pool, Some(delay));
    let app = build_app_router(state.clone(), &test_config());
    (app, state)
}

// ---------------------------------------------------------------------------
// Account helpers
// ---------------------------------------------------------------------------

/// Provision an account through the real engine path.
pub async fn provision_account(
    state: &AppState,
    role: &str,
    email: &str,
    full_name: &str,
    department: Option<&str>,
) -> Account {
    let request = ProvisionRequest {
        email: email.to_string(),
        password: TEST_PASSWORD.to_string(),
        role: role.to_string(),
        full_name: full_name.to_string(),
        department: department.map(str::to_string),
        position: None,
        start_date: None,
    };
    provisioner::provision(state, request)
        .await
        .expect("provisioning should succeed")
}

/// Log in via the API and return the access token.
pub async fn login_token(app: &Router, email: &str) -> String {
    let body = serde_json::json!({ "email": email, "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK, "login should succeed");
    let json = body_json(response).await;
    json["access_token"]
        .as_str()
        .expect("login response must contain access_token")
        .to_string()
}

/// Build a valid field object for a form type descriptor.
pub fn valid_fields(descriptor: &FormTypeDescriptor) -> serde_json::Value {
    let mut fields = serde_json::Map::new();
    for spec in descriptor.fields {
        let value = match spec.kind {
            FieldKind::Text => serde_json::json!("sample value"),
            FieldKind::Boolean => serde_json::json!(true),
            FieldKind::Date => serde_json::json!("2026-08-01"),
        };
        fields.insert(spec.name.to_string(), value);
    }
    serde_json::Value::Object(fields)
}

/// Build a full submission body (fields + signature) for a form type.
pub fn submission_body(descriptor: &FormTypeDescriptor) -> serde_json::Value {
    serde_json::json!({
        "fields": valid_fields(descriptor),
        "signature": "Dana Park",
        "signature_date": "2026-08-01",
    })
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn post_json_auth(
    app: &Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn put_json_auth(
    app: &Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method("PUT")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
}
