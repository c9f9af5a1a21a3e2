//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does
//! not meet the minimum requirement. These gate whole admin surfaces at
//! the type level; per-record ownership decisions additionally go through
//! `gangway_core::policy::authorize` inside the engine.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use gangway_core::error::CoreError;
use gangway_core::roles::{is_privileged, ROLE_ADMIN};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires `manager` or `admin` role. Rejects with 403 Forbidden
/// otherwise.
///
/// ```ignore
/// async fn elevated(RequirePrivileged(user): RequirePrivileged) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequirePrivileged(pub AuthUser);

impl FromRequestParts<AppState> for RequirePrivileged {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !is_privileged(&user.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Manager or Admin role required".into(),
            )));
        }
        Ok(RequirePrivileged(user))
    }
}
