//! Route definitions for the `/me` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::me;
use crate::state::AppState;

/// Routes mounted at the API root (`/me`).
pub fn router() -> Router<AppState> {
    Router::new().route("/me", get(me::get_me).put(me::update_me))
}
