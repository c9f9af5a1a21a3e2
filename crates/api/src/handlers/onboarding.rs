//! Handlers for the caller's own onboarding workflow: catalog listing,
//! progress, and form submission. The progress record is created lazily on
//! first access.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::engine::{progress, submissions};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /onboarding/forms
// ---------------------------------------------------------------------------

/// List every form type in the catalog, with its required field schema.
pub async fn list_forms(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    Ok(Json(DataResponse {
        data: state.catalog.descriptors(),
    }))
}

// ---------------------------------------------------------------------------
// GET /onboarding/progress
// ---------------------------------------------------------------------------

/// The caller's own onboarding progress, created on first access.
pub async fn my_progress(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let record = progress::view_progress(&state, &auth, auth.account_id).await?;

    tracing::debug!(account_id = auth.account_id, "Fetched onboarding progress");
    Ok(Json(DataResponse { data: record }))
}

// ---------------------------------------------------------------------------
// POST /onboarding/forms/{form_type}
// ---------------------------------------------------------------------------

/// Submit one onboarding form for the caller. Duplicate submissions are
/// rejected with 409.
pub async fn submit_form(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(form_type): Path<String>,
    Json(input): Json<submissions::SubmitForm>,
) -> AppResult<impl IntoResponse> {
    let submission =
        submissions::submit(&state, &auth, auth.account_id, &form_type, input).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: submission })))
}

// ---------------------------------------------------------------------------
// GET /onboarding/submissions
// ---------------------------------------------------------------------------

/// The caller's own submissions, keyed by form type. Unsubmitted types are
/// omitted.
pub async fn my_submissions(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let records = submissions::list_for_employee(&state, &auth, auth.account_id).await?;
    Ok(Json(DataResponse { data: records }))
}
