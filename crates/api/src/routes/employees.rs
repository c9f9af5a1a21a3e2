//! Route definitions for the `/employees` resource (per-employee reads).

use axum::routing::get;
use axum::Router;

use crate::handlers::employees;
use crate::state::AppState;

/// Routes mounted at `/employees`. Ownership checks happen in the engine.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}/progress", get(employees::get_progress))
        .route("/{id}/submissions", get(employees::get_submissions))
}
