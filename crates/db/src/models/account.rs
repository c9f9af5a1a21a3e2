//! Account (profile record) model and DTOs.
//!
//! An account's id equals the owning identity's id. The row is
//! materialized asynchronously after identity creation and repaired by the
//! provisioner's update-or-insert step, so every column the provisioner
//! writes must be writable through both paths.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use gangway_core::types::{Date, DbId, Timestamp};

/// Full account row from the `accounts` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Account {
    pub id: DbId,
    pub email: String,
    pub role_id: DbId,
    pub full_name: String,
    /// Assigned only to employee accounts, by the employee-ID generator.
    pub employee_id: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub start_date: Option<Date>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The complete profile applied by the provisioner, identical for the
/// update path and the fallback-insert path.
#[derive(Debug, Clone)]
pub struct ProfileFields {
    pub role_id: DbId,
    pub full_name: String,
    pub employee_id: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub start_date: Option<Date>,
}

/// DTO for account updates. Only non-`None` fields are applied; `role_id`
/// and `is_active` are privileged and must be stripped for self-service
/// callers before reaching the repository.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateAccount {
    pub full_name: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub start_date: Option<Date>,
    pub role_id: Option<DbId>,
    pub is_active: Option<bool>,
}

/// External-facing account representation with the role name resolved.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: DbId,
    pub email: String,
    pub role: String,
    pub full_name: String,
    pub employee_id: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub start_date: Option<Date>,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl AccountResponse {
    pub fn from_account(account: &Account, role: String) -> Self {
        AccountResponse {
            id: account.id,
            email: account.email.clone(),
            role,
            full_name: account.full_name.clone(),
            employee_id: account.employee_id.clone(),
            department: account.department.clone(),
            position: account.position.clone(),
            start_date: account.start_date,
            is_active: account.is_active,
            created_at: account.created_at,
        }
    }
}
