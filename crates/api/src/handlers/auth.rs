//! Handlers for the `/auth` resource (signup, login, refresh, logout,
//! password reset).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use gangway_core::error::CoreError;
use gangway_core::identity::SignIn;
use gangway_core::roles::ROLE_EMPLOYEE;
use gangway_core::types::{Date, DbId};
use gangway_db::models::account::AccountResponse;
use gangway_db::repositories::{AccountRepo, RoleRepo};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::validate_password_strength;
use crate::engine::provisioner::{self, ProvisionRequest};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

use super::account_response;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup` (employee self-signup).
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    pub password: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub full_name: String,
    pub department: Option<String>,
    pub position: Option<String>,
    pub start_date: Option<Date>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh` and `POST /auth/logout`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Request body for `POST /auth/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

/// Successful authentication response returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public account info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub email: String,
    pub full_name: String,
    pub role: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
///
/// Employee self-signup. The role is forced to `employee`; privileged
/// accounts are created through the admin surface only.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<AccountResponse>)> {
    input.validate()?;
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let request = ProvisionRequest {
        email: input.email,
        password: input.password,
        role: ROLE_EMPLOYEE.to_string(),
        full_name: input.full_name,
        department: input.department,
        position: input.position,
        start_date: input.start_date,
    };
    let account = provisioner::provision(&state, request).await?;
    let response = account_response(&state, &account).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Returns access and refresh tokens.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let sign_in = state.identity.sign_in(&input.email, &input.password).await?;
    let response = build_auth_response(&state, sign_in).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let sign_in = state.identity.refresh(&input.refresh_token).await?;
    let response = build_auth_response(&state, sign_in).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// Revoke the presented refresh token. Returns 204 No Content.
pub async fn logout(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(input): Json<RefreshRequest>,
) -> AppResult<StatusCode> {
    state.identity.sign_out(&input.refresh_token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/auth/reset-password
///
/// Replace the caller's own password. Every open session is revoked, so
/// other devices must sign in again. Returns 204 No Content.
pub async fn reset_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    validate_password_strength(&input.new_password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let account = AccountRepo::find_by_id(&state.pool, auth.account_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Account",
            id: auth.account_id,
        }))?;

    state
        .identity
        .reset_password(&account.email, &input.new_password)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve the signed-in identity's account and role, generate an access
/// token, and build the response.
async fn build_auth_response(state: &AppState, sign_in: SignIn) -> AppResult<AuthResponse> {
    let account = AccountRepo::find_by_id(&state.pool, sign_in.identity.id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Forbidden(
                "Account record is not available yet".into(),
            ))
        })?;

    if !account.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let role = RoleRepo::resolve_name(&state.pool, account.role_id).await?;

    let access_token = generate_access_token(account.id, &role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(AuthResponse {
        access_token,
        refresh_token: sign_in.refresh_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: UserInfo {
            id: account.id,
            email: account.email,
            full_name: account.full_name,
            role,
        },
    })
}
