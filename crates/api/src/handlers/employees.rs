//! Handlers for reading a specific employee's onboarding records. Access
//! is self-or-privileged, decided by the core policy inside the engine.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use gangway_core::types::DbId;

use crate::engine::{progress, submissions};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/employees/{id}/progress
pub async fn get_progress(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let record = progress::view_progress(&state, &auth, id).await?;
    Ok(Json(DataResponse { data: record }))
}

/// GET /api/v1/employees/{id}/submissions
pub async fn get_submissions(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let records = submissions::list_for_employee(&state, &auth, id).await?;
    Ok(Json(DataResponse { data: records }))
}
