use std::sync::Arc;

use gangway_core::catalog::FormCatalog;
use gangway_core::identity::{EmployeeIdGenerator, IdentityProvider};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already
/// `Copy`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: gangway_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Form catalog, built once at startup and read-only thereafter.
    pub catalog: FormCatalog,
    /// Identity store (credential creation, sign-in, sessions).
    pub identity: Arc<dyn IdentityProvider>,
    /// Employee-ID issuance.
    pub employee_ids: Arc<dyn EmployeeIdGenerator>,
}
