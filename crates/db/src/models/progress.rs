//! Onboarding progress model and aggregate-view row.

use serde::Serialize;
use sqlx::FromRow;

use gangway_core::types::{DbId, Timestamp};

/// A row from the `onboarding_progress` table. Exactly one exists per
/// employee account once the workflow has been touched; it is created
/// lazily on first access.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OnboardingProgress {
    pub id: DbId,
    pub account_id: DbId,
    pub started_at: Timestamp,
    pub onboarding_status: String,
    pub last_updated_at: Timestamp,
}

/// Filters accepted by the privileged aggregate view. All optional and
/// combined with AND.
#[derive(Debug, Default, Clone)]
pub struct AggregateFilter {
    pub status: Option<String>,
    pub department: Option<String>,
    pub role: Option<String>,
}

/// One row of the aggregate view: progress joined with its account and
/// resolved role name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AggregateRow {
    pub account_id: DbId,
    pub email: String,
    pub full_name: String,
    pub employee_id: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub role: String,
    pub onboarding_status: String,
    pub started_at: Timestamp,
    pub last_updated_at: Timestamp,
}
