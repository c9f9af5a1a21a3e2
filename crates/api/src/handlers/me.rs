//! Handlers for the authenticated caller's own profile.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use gangway_core::error::CoreError;
use gangway_core::types::Date;
use gangway_db::models::account::{AccountResponse, UpdateAccount};
use gangway_db::repositories::AccountRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

use super::account_response;

/// Request body for `PUT /me`. Deliberately excludes role and activation:
/// those are privileged fields reachable only through the admin surface.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub start_date: Option<Date>,
}

/// GET /api/v1/me
///
/// The caller's own account record.
pub async fn get_me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<AccountResponse>> {
    let account = AccountRepo::find_by_id(&state.pool, auth.account_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Account",
            id: auth.account_id,
        }))?;

    Ok(Json(account_response(&state, &account).await?))
}

/// PUT /api/v1/me
///
/// Update the caller's own non-privileged profile fields.
pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<UpdateProfileRequest>,
) -> AppResult<Json<AccountResponse>> {
    let update = UpdateAccount {
        full_name: input.full_name,
        department: input.department,
        position: input.position,
        start_date: input.start_date,
        role_id: None,
        is_active: None,
    };
    let account = AccountRepo::update(&state.pool, auth.account_id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Account",
            id: auth.account_id,
        }))?;

    tracing::info!(account_id = auth.account_id, "Profile updated");
    Ok(Json(account_response(&state, &account).await?))
}
