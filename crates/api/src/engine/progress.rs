//! Progress tracking: lazy creation, status recomputation, aggregate
//! views, and explicit admin overrides.

use gangway_core::error::CoreError;
use gangway_core::pagination::{clamp_page_size, page_offset};
use gangway_core::policy::{authorize, AccessAction};
use gangway_core::progress::{derive_status, OnboardingStatus};
use gangway_core::roles::ROLE_EMPLOYEE;
use gangway_core::types::DbId;
use gangway_db::models::account::Account;
use gangway_db::models::progress::{AggregateFilter, AggregateRow, OnboardingProgress};
use gangway_db::repositories::{AccountRepo, ProgressRepo, RoleRepo, SubmissionRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Load an account and require it to be an active employee. Non-employee
/// accounts have no onboarding workflow, so they are reported as missing
/// employees rather than as policy failures.
pub(crate) async fn require_employee(state: &AppState, account_id: DbId) -> AppResult<Account> {
    let account = AccountRepo::find_by_id(&state.pool, account_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Employee",
            id: account_id,
        })?;
    let role = RoleRepo::resolve_name(&state.pool, account.role_id).await?;
    if role != ROLE_EMPLOYEE {
        return Err(CoreError::NotFound {
            entity: "Employee",
            id: account_id,
        }
        .into());
    }
    Ok(account)
}

/// Idempotent get-or-create for an employee's progress record, gated by
/// the access policy. Concurrent calls cannot create two rows; the unique
/// constraint on `account_id` is the source of truth.
pub async fn view_progress(
    state: &AppState,
    actor: &AuthUser,
    account_id: DbId,
) -> AppResult<OnboardingProgress> {
    authorize(
        &actor.role,
        actor.account_id,
        account_id,
        AccessAction::ReadProgress,
    )?;
    require_employee(state, account_id).await?;
    Ok(ProgressRepo::ensure(&state.pool, account_id).await?)
}

/// Recompute the aggregate status from the submission ledger, writing only
/// on change.
///
/// Only catalog types count toward completion, so a stale ledger entry for
/// a retired form type can never complete an onboarding. A `completed`
/// status is sticky: recomputation never downgrades it, only the explicit
/// reset and override operations can.
pub async fn recompute_status(
    state: &AppState,
    account_id: DbId,
) -> AppResult<OnboardingProgress> {
    let progress = ProgressRepo::ensure(&state.pool, account_id).await?;

    let submitted = SubmissionRepo::submitted_types(&state.pool, account_id).await?;
    let counted = submitted
        .iter()
        .filter(|t| state.catalog.contains(t))
        .count();
    let derived = derive_status(counted, state.catalog.required_count());

    if progress.onboarding_status == OnboardingStatus::Completed.as_str()
        && derived != OnboardingStatus::Completed
    {
        return Ok(progress);
    }

    match ProgressRepo::set_status_if_changed(&state.pool, account_id, derived.as_str()).await? {
        Some(updated) => {
            tracing::info!(
                account_id,
                status = %derived,
                submitted = counted,
                "Onboarding status updated"
            );
            Ok(updated)
        }
        None => Ok(progress),
    }
}

/// Privileged aggregate view: (account, progress) pairs filtered by
/// status, department, and role, with page-based pagination.
pub async fn aggregate_view(
    state: &AppState,
    actor: &AuthUser,
    filter: AggregateFilter,
    page: Option<i64>,
    page_size: Option<i64>,
) -> AppResult<Vec<AggregateRow>> {
    authorize(
        &actor.role,
        actor.account_id,
        actor.account_id,
        AccessAction::ReadAggregate,
    )?;

    if let Some(ref status) = filter.status {
        status
            .parse::<OnboardingStatus>()
            .map_err(CoreError::Validation)?;
    }

    let limit = clamp_page_size(page_size);
    let offset = page_offset(page, limit);
    Ok(ProgressRepo::list_aggregate(&state.pool, &filter, limit, offset).await?)
}

/// Explicit admin override of the derived status. Always writes, so the
/// audit trail in `last_updated_at` reflects the intervention.
pub async fn override_status(
    state: &AppState,
    actor: &AuthUser,
    account_id: DbId,
    status: OnboardingStatus,
) -> AppResult<OnboardingProgress> {
    authorize(
        &actor.role,
        actor.account_id,
        account_id,
        AccessAction::OverrideProgress,
    )?;
    require_employee(state, account_id).await?;
    ProgressRepo::ensure(&state.pool, account_id).await?;

    let updated = ProgressRepo::set_status(&state.pool, account_id, status.as_str())
        .await?
        .ok_or(CoreError::NotFound {
            entity: "OnboardingProgress",
            id: account_id,
        })?;

    tracing::info!(
        account_id,
        status = %status,
        admin_id = actor.account_id,
        "Onboarding status overridden"
    );
    Ok(updated)
}

/// Explicit admin reset back to `pending`. The only sanctioned way to move
/// a completed onboarding backwards.
pub async fn reset_progress(
    state: &AppState,
    actor: &AuthUser,
    account_id: DbId,
) -> AppResult<OnboardingProgress> {
    override_status(state, actor, account_id, OnboardingStatus::Pending).await
}
