//! Route definitions for the `/admin` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// Account mutation requires the `admin` role; the aggregate and audit
/// views accept managers too (enforced by handler extractors).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users).post(admin::create_user))
        .route(
            "/users/{id}",
            get(admin::get_user)
                .put(admin::update_user)
                .delete(admin::deactivate_user),
        )
        .route("/users/{id}/reset-password", post(admin::reset_password))
        .route("/onboarding", get(admin::aggregate_view))
        .route("/submissions", get(admin::list_submissions))
        .route("/employees/{id}/progress", put(admin::override_progress))
        .route(
            "/employees/{id}/progress/reset",
            post(admin::reset_progress),
        )
}
