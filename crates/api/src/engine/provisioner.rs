//! Two-phase account provisioning.
//!
//! Phase 1 registers credentials with the identity provider. The provider
//! materializes a baseline profile row out-of-band, so phase 2 applies the
//! full profile with an update, polling with bounded backoff while the row
//! has not appeared, and falls back to a direct insert once the schedule
//! is exhausted. Both paths converge on the same final row shape, and the
//! whole step is idempotent: an insert that loses a race treats the
//! existing row as the winner and re-applies the update.

use std::time::Duration;

use gangway_core::error::CoreError;
use gangway_core::identity::IdentityMetadata;
use gangway_core::roles::ROLE_EMPLOYEE;
use gangway_core::types::{Date, DbId};
use gangway_db::models::account::{Account, ProfileFields};
use gangway_db::repositories::{AccountRepo, ProgressRepo, RoleRepo};

use crate::error::AppResult;
use crate::state::AppState;

/// Backoff schedule for the profile-materialization wait. The sum bounds
/// the total wait; after the last delay the fallback insert takes over, so
/// provisioning never hangs on a slow materialization.
const PROFILE_POLL_BACKOFF: &[Duration] = &[
    Duration::from_millis(25),
    Duration::from_millis(50),
    Duration::from_millis(100),
    Duration::from_millis(200),
    Duration::from_millis(400),
];

/// Input to [`provision`]. The role has already been constrained by the
/// calling surface (self-signup forces `employee`; the privileged surface
/// allows `admin`/`manager` only).
#[derive(Debug)]
pub struct ProvisionRequest {
    pub email: String,
    pub password: String,
    pub role: String,
    pub full_name: String,
    pub department: Option<String>,
    pub position: Option<String>,
    pub start_date: Option<Date>,
}

/// Create an account end to end: identity, employee id, profile row,
/// progress record. Returns the final persisted account, never the
/// pre-fallback partial state.
pub async fn provision(state: &AppState, request: ProvisionRequest) -> AppResult<Account> {
    let role_id = RoleRepo::id_of(&state.pool, &request.role)
        .await?
        .ok_or_else(|| CoreError::Validation(format!("Unknown role '{}'", request.role)))?;

    // Phase 1: credentials. An email conflict aborts here with no state
    // written.
    let metadata = IdentityMetadata {
        full_name: request.full_name.clone(),
        role: request.role.clone(),
        department: request.department.clone(),
        position: request.position.clone(),
        start_date: request.start_date,
    };
    let identity_id = state
        .identity
        .create_identity(&request.email, &request.password, &metadata)
        .await?;

    // Employee accounts get a generated id before the profile is written.
    // Generator failure leaves the identity orphaned on purpose: operators
    // reconcile, rather than risking a failed compensating delete.
    let is_employee = request.role == ROLE_EMPLOYEE;
    let employee_id = if is_employee {
        let generated = state.employee_ids.next().await.map_err(|e| {
            tracing::error!(
                identity_id,
                email = %request.email,
                error = %e,
                "Employee ID generation failed; identity left for reconciliation"
            );
            CoreError::Provisioning(format!("Employee ID generation failed: {e}"))
        })?;
        Some(generated)
    } else {
        None
    };

    // Phase 2: converge the profile row on the full requested shape.
    let fields = ProfileFields {
        role_id,
        full_name: request.full_name,
        employee_id,
        department: request.department,
        position: request.position,
        start_date: request.start_date,
    };
    let account = apply_or_insert_profile(state, identity_id, &request.email, &fields).await?;

    // Employees start their onboarding workflow immediately. `ensure` is
    // idempotent, so a retried request cannot create a second record.
    if is_employee {
        ProgressRepo::ensure(&state.pool, account.id).await?;
    }

    tracing::info!(
        account_id = account.id,
        role = %request.role,
        "Provisioned account"
    );
    Ok(account)
}

/// Update the profile row, polling while the baseline has not materialized,
/// then fall back to inserting the full row. The existing row always wins
/// a race: a conflicting insert is converted into a final update.
async fn apply_or_insert_profile(
    state: &AppState,
    id: DbId,
    email: &str,
    fields: &ProfileFields,
) -> AppResult<Account> {
    let mut updated = AccountRepo::apply_profile(&state.pool, id, fields).await?;
    for delay in PROFILE_POLL_BACKOFF {
        if updated.is_some() {
            break;
        }
        tokio::time::sleep(*delay).await;
        updated = AccountRepo::apply_profile(&state.pool, id, fields).await?;
    }

    if let Some(account) = updated {
        return Ok(account);
    }

    tracing::debug!(
        account_id = id,
        "Profile row not materialized in time; taking fallback insert"
    );
    match AccountRepo::insert_profile(&state.pool, id, email, fields).await {
        Ok(account) => Ok(account),
        Err(e) if gangway_db::is_unique_violation(&e) => {
            // The baseline row appeared between the last poll and the
            // insert. Re-apply so the final shape matches the request.
            AccountRepo::apply_profile(&state.pool, id, fields)
                .await?
                .ok_or_else(|| {
                    CoreError::ProvisioningTimeout(format!(
                        "Profile row for account {id} conflicted on insert but was not updatable"
                    ))
                    .into()
                })
        }
        Err(e) => Err(e.into()),
    }
}
