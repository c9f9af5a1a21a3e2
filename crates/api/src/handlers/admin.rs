//! Handlers for the `/admin` resource: privileged account management,
//! the aggregate onboarding view, the submission audit listing, and
//! explicit progress overrides.
//!
//! Account mutation requires the `admin` role via [`RequireAdmin`]; the
//! read-only views accept managers via [`RequirePrivileged`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use gangway_core::error::CoreError;
use gangway_core::progress::OnboardingStatus;
use gangway_core::roles;
use gangway_core::types::{Date, DbId};
use gangway_db::models::account::{AccountResponse, UpdateAccount};
use gangway_db::models::progress::AggregateFilter;
use gangway_db::models::submission::SubmissionFilter;
use gangway_db::repositories::{AccountRepo, RoleRepo};

use crate::auth::password::validate_password_strength;
use crate::engine::{progress, provisioner, submissions};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequirePrivileged};
use crate::response::DataResponse;
use crate::state::AppState;

use super::account_response;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/users` (privileged signup).
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    pub password: String,
    /// Must be `admin` or `manager`; employees sign themselves up.
    pub role: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub full_name: String,
    pub department: Option<String>,
    pub position: Option<String>,
    pub start_date: Option<Date>,
}

/// Request body for `PUT /admin/users/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub full_name: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub start_date: Option<Date>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

/// Request body for `POST /admin/users/{id}/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

/// Query parameters for `GET /admin/onboarding`.
#[derive(Debug, Deserialize)]
pub struct AggregateParams {
    pub status: Option<String>,
    pub department: Option<String>,
    pub role: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// Query parameters for `GET /admin/submissions`.
#[derive(Debug, Deserialize)]
pub struct SubmissionListParams {
    pub form_type: Option<String>,
    pub account_id: Option<DbId>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// Request body for `PUT /admin/employees/{id}/progress`.
#[derive(Debug, Deserialize)]
pub struct OverrideProgressRequest {
    pub status: OnboardingStatus,
}

// ---------------------------------------------------------------------------
// User management
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/users
///
/// Create a privileged (admin/manager) account through the same
/// provisioning path employees use.
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<AccountResponse>)> {
    input.validate()?;
    roles::validate_privileged_signup_role(&input.role)?;
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let request = provisioner::ProvisionRequest {
        email: input.email,
        password: input.password,
        role: input.role,
        full_name: input.full_name,
        department: input.department,
        position: input.position,
        start_date: input.start_date,
    };
    let account = provisioner::provision(&state, request).await?;
    let response = account_response(&state, &account).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/v1/admin/users
///
/// List all accounts with resolved role names.
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<AccountResponse>>> {
    let accounts = AccountRepo::list(&state.pool).await?;

    // Pre-fetch all roles to avoid N+1 queries.
    let roles = RoleRepo::list(&state.pool).await?;

    let responses: Vec<AccountResponse> = accounts
        .iter()
        .map(|account| {
            let role = roles
                .iter()
                .find(|r| r.id == account.role_id)
                .map(|r| r.name.clone())
                .unwrap_or_else(|| "unknown".to_string());
            AccountResponse::from_account(account, role)
        })
        .collect();

    Ok(Json(responses))
}

/// GET /api/v1/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<AccountResponse>> {
    let account = AccountRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Account",
            id,
        }))?;

    Ok(Json(account_response(&state, &account).await?))
}

/// PUT /api/v1/admin/users/{id}
///
/// Update an account, including the privileged role and activation fields.
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<AccountResponse>> {
    let role_id = match input.role {
        Some(ref role) => Some(
            RoleRepo::id_of(&state.pool, role)
                .await?
                .ok_or_else(|| CoreError::Validation(format!("Unknown role '{role}'")))?,
        ),
        None => None,
    };

    let update = UpdateAccount {
        full_name: input.full_name,
        department: input.department,
        position: input.position,
        start_date: input.start_date,
        role_id,
        is_active: input.is_active,
    };
    let account = AccountRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Account",
            id,
        }))?;

    Ok(Json(account_response(&state, &account).await?))
}

/// DELETE /api/v1/admin/users/{id}
///
/// Soft-deactivate an account. Returns 204 No Content.
pub async fn deactivate_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deactivated = AccountRepo::deactivate(&state.pool, id).await?;
    if !deactivated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Account",
            id,
        }));
    }

    tracing::info!(account_id = id, admin_id = admin.account_id, "Account deactivated");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/users/{id}/reset-password
///
/// Replace an account's password and revoke its sessions. Returns 204.
pub async fn reset_password(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    validate_password_strength(&input.new_password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let account = AccountRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Account",
            id,
        }))?;

    state
        .identity
        .reset_password(&account.email, &input.new_password)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Aggregate onboarding view
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/onboarding
///
/// Paginated (account, progress) rows for all active employees, filterable
/// by status, department, and role.
pub async fn aggregate_view(
    State(state): State<AppState>,
    RequirePrivileged(viewer): RequirePrivileged,
    Query(params): Query<AggregateParams>,
) -> AppResult<impl IntoResponse> {
    let filter = AggregateFilter {
        status: params.status,
        department: params.department,
        role: params.role,
    };
    let rows =
        progress::aggregate_view(&state, &viewer, filter, params.page, params.page_size).await?;

    Ok(Json(DataResponse { data: rows }))
}

// ---------------------------------------------------------------------------
// Submission audit listing
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/submissions
pub async fn list_submissions(
    State(state): State<AppState>,
    RequirePrivileged(viewer): RequirePrivileged,
    Query(params): Query<SubmissionListParams>,
) -> AppResult<impl IntoResponse> {
    let filter = SubmissionFilter {
        form_type: params.form_type,
        account_id: params.account_id,
    };
    let rows =
        submissions::list_all(&state, &viewer, filter, params.page, params.page_size).await?;

    Ok(Json(DataResponse { data: rows }))
}

// ---------------------------------------------------------------------------
// Progress override / reset
// ---------------------------------------------------------------------------

/// PUT /api/v1/admin/employees/{id}/progress
///
/// Explicitly override an employee's derived onboarding status.
pub async fn override_progress(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<OverrideProgressRequest>,
) -> AppResult<impl IntoResponse> {
    let record = progress::override_status(&state, &admin, id, input.status).await?;
    Ok(Json(DataResponse { data: record }))
}

/// POST /api/v1/admin/employees/{id}/progress/reset
///
/// Reset an employee's onboarding status to `pending`. The submission
/// ledger is untouched; a subsequent recompute reflects it again.
pub async fn reset_progress(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let record = progress::reset_progress(&state, &admin, id).await?;
    Ok(Json(DataResponse { data: record }))
}
