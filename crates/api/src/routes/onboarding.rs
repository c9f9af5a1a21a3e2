//! Route definitions for the `/onboarding` resource (self-service).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::onboarding;
use crate::state::AppState;

/// Routes mounted at `/onboarding`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/forms", get(onboarding::list_forms))
        .route("/forms/{form_type}", post(onboarding::submit_form))
        .route("/progress", get(onboarding::my_progress))
        .route("/submissions", get(onboarding::my_submissions))
}
