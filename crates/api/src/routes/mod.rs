pub mod admin;
pub mod auth;
pub mod employees;
pub mod health;
pub mod me;
pub mod onboarding;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                             employee self-signup (public)
/// /auth/login                              login (public)
/// /auth/refresh                            refresh (public)
/// /auth/logout                             logout (requires auth)
///
/// /me                                      own profile (get, update)
///
/// /onboarding/forms                        form catalog
/// /onboarding/forms/{form_type}            submit a form (POST)
/// /onboarding/progress                     own progress
/// /onboarding/submissions                  own submissions by form type
///
/// /employees/{id}/progress                 self or manager/admin
/// /employees/{id}/submissions              self or manager/admin
///
/// /admin/users                             list, create (admin only)
/// /admin/users/{id}                        get, update, deactivate
/// /admin/users/{id}/reset-password         reset password
/// /admin/onboarding                        aggregate view (manager/admin)
/// /admin/submissions                       audit listing (manager/admin)
/// /admin/employees/{id}/progress           status override (PUT, admin)
/// /admin/employees/{id}/progress/reset     reset to pending (POST, admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .merge(me::router())
        .nest("/onboarding", onboarding::router())
        .nest("/employees", employees::router())
        .nest("/admin", admin::router())
}
