//! HTTP-level integration tests for signup, login, token refresh, and
//! session revocation.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json, post_json_auth, TEST_PASSWORD};
use sqlx::PgPool;

use gangway_db::repositories::AccountRepo;

// ---------------------------------------------------------------------------
// Signup
// ---------------------------------------------------------------------------

/// Self-signup creates an employee account with a generated employee id;
/// a second signup gets a distinct one.
#[sqlx::test(migrations = "../../db/migrations")]
async fn signup_creates_employee_with_unique_id(pool: PgPool) {
    let (app, _state) = common::build_test_app(pool);

    let body = serde_json::json!({
        "email": "a@x.com",
        "password": "pass8chr",
        "full_name": "Avery Quinn",
        "department": "Nursing",
    });
    let response = post_json(&app, "/api/v1/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let first = body_json(response).await;
    assert_eq!(first["role"], "employee");
    assert_eq!(first["email"], "a@x.com");
    let first_employee_id = first["employee_id"].as_str().unwrap();
    assert!(!first_employee_id.is_empty());

    let body = serde_json::json!({
        "email": "b@x.com",
        "password": "pass8chr",
        "full_name": "Blake Reyes",
    });
    let response = post_json(&app, "/api/v1/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let second = body_json(response).await;
    assert_ne!(second["employee_id"].as_str().unwrap(), first_employee_id);
}

/// A second signup with the same email is an identity conflict.
#[sqlx::test(migrations = "../../db/migrations")]
async fn signup_duplicate_email_conflicts(pool: PgPool) {
    let (app, _state) = common::build_test_app(pool);

    let body = serde_json::json!({
        "email": "a@x.com",
        "password": "pass8chr",
        "full_name": "Avery Quinn",
    });
    let response = post_json(&app, "/api/v1/auth/signup", body.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(&app, "/api/v1/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "IDENTITY_CONFLICT");
}

/// Password shorter than the minimum is rejected before any state is
/// written.
#[sqlx::test(migrations = "../../db/migrations")]
async fn signup_short_password_rejected(pool: PgPool) {
    let (app, state) = common::build_test_app(pool);

    let body = serde_json::json!({
        "email": "short@x.com",
        "password": "seven77",
        "full_name": "Too Short",
    });
    let response = post_json(&app, "/api/v1/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(AccountRepo::find_by_email(&state.pool, "short@x.com")
        .await
        .unwrap()
        .is_none());
}

/// Malformed email is rejected.
#[sqlx::test(migrations = "../../db/migrations")]
async fn signup_invalid_email_rejected(pool: PgPool) {
    let (app, _state) = common::build_test_app(pool);

    let body = serde_json::json!({
        "email": "not-an-email",
        "password": "pass8chr",
        "full_name": "Bad Email",
    });
    let response = post_json(&app, "/api/v1/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Login / refresh / logout
// ---------------------------------------------------------------------------

/// Successful login returns tokens and user info; a wrong password is 401.
#[sqlx::test(migrations = "../../db/migrations")]
async fn login_success_and_wrong_password(pool: PgPool) {
    let (app, state) = common::build_test_app(pool);
    common::provision_account(&state, "employee", "login@x.com", "Login User", None).await;

    let body = serde_json::json!({ "email": "login@x.com", "password": TEST_PASSWORD });
    let response = post_json(&app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert!(json["expires_in"].is_number());
    assert_eq!(json["user"]["email"], "login@x.com");
    assert_eq!(json["user"]["role"], "employee");

    let body = serde_json::json!({ "email": "login@x.com", "password": "wrong-password" });
    let response = post_json(&app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Refresh rotates the token: the new pair works, the spent one does not.
#[sqlx::test(migrations = "../../db/migrations")]
async fn refresh_rotates_tokens(pool: PgPool) {
    let (app, state) = common::build_test_app(pool);
    common::provision_account(&state, "employee", "rotate@x.com", "Rotate User", None).await;

    let body = serde_json::json!({ "email": "rotate@x.com", "password": TEST_PASSWORD });
    let login = body_json(post_json(&app, "/api/v1/auth/login", body).await).await;
    let refresh_token = login["refresh_token"].as_str().unwrap();

    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(&app, "/api/v1/auth/refresh", body.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let refreshed = body_json(response).await;
    assert_ne!(refreshed["refresh_token"].as_str().unwrap(), refresh_token);

    // The original token was spent by the rotation.
    let response = post_json(&app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Logout revokes the presented refresh token.
#[sqlx::test(migrations = "../../db/migrations")]
async fn logout_revokes_session(pool: PgPool) {
    let (app, state) = common::build_test_app(pool);
    common::provision_account(&state, "employee", "logout@x.com", "Logout User", None).await;

    let body = serde_json::json!({ "email": "logout@x.com", "password": TEST_PASSWORD });
    let login = body_json(post_json(&app, "/api/v1/auth/login", body).await).await;
    let access_token = login["access_token"].as_str().unwrap();
    let refresh_token = login["refresh_token"].as_str().unwrap();

    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response =
        post_json_auth(&app, "/api/v1/auth/logout", access_token, body.clone()).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = post_json(&app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Password reset swaps the credential and revokes existing sessions.
#[sqlx::test(migrations = "../../db/migrations")]
async fn reset_password_replaces_credential(pool: PgPool) {
    let (app, state) = common::build_test_app(pool);
    common::provision_account(&state, "employee", "pw@x.com", "Pw Changer", None).await;

    let body = serde_json::json!({ "email": "pw@x.com", "password": TEST_PASSWORD });
    let login = body_json(post_json(&app, "/api/v1/auth/login", body).await).await;
    let access_token = login["access_token"].as_str().unwrap();
    let old_refresh = login["refresh_token"].as_str().unwrap();

    let body = serde_json::json!({ "new_password": "brand-new-pass" });
    let response =
        post_json_auth(&app, "/api/v1/auth/reset-password", access_token, body).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Old password and old refresh token are both dead; the new password
    // works.
    let body = serde_json::json!({ "email": "pw@x.com", "password": TEST_PASSWORD });
    let response = post_json(&app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = serde_json::json!({ "refresh_token": old_refresh });
    let response = post_json(&app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = serde_json::json!({ "email": "pw@x.com", "password": "brand-new-pass" });
    let response = post_json(&app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Login to a deactivated account returns 403.
#[sqlx::test(migrations = "../../db/migrations")]
async fn login_deactivated_account_forbidden(pool: PgPool) {
    let (app, state) = common::build_test_app(pool);
    let account =
        common::provision_account(&state, "employee", "inactive@x.com", "Inactive", None).await;
    AccountRepo::deactivate(&state.pool, account.id).await.unwrap();

    let body = serde_json::json!({ "email": "inactive@x.com", "password": TEST_PASSWORD });
    let response = post_json(&app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Protected routes reject missing and garbage tokens with 401.
#[sqlx::test(migrations = "../../db/migrations")]
async fn protected_routes_require_auth(pool: PgPool) {
    let (app, _state) = common::build_test_app(pool);

    let response = common::get(&app, "/api/v1/onboarding/progress").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(&app, "/api/v1/onboarding/progress", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
