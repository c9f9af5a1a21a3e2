//! Repository for the `onboarding_progress` table.

use sqlx::PgPool;

use gangway_core::types::DbId;

use crate::models::progress::{AggregateFilter, AggregateRow, OnboardingProgress};

/// Column list for `onboarding_progress` queries.
const COLUMNS: &str = "id, account_id, started_at, onboarding_status, last_updated_at";

/// Provides operations for per-employee onboarding progress records.
pub struct ProgressRepo;

impl ProgressRepo {
    /// Get the progress record for an account, creating one with defaults
    /// if it does not exist yet.
    ///
    /// Safe under concurrent duplicate calls: the unique constraint on
    /// `account_id` is the source of truth, and the no-op `DO UPDATE`
    /// guarantees `RETURNING` always produces the surviving row, so
    /// `started_at` is always the first caller's timestamp.
    pub async fn ensure(pool: &PgPool, account_id: DbId) -> Result<OnboardingProgress, sqlx::Error> {
        let query = format!(
            "INSERT INTO onboarding_progress (account_id) \
             VALUES ($1) \
             ON CONFLICT (account_id) DO UPDATE SET account_id = onboarding_progress.account_id \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OnboardingProgress>(&query)
            .bind(account_id)
            .fetch_one(pool)
            .await
    }

    /// Find the progress record for an account without creating one.
    pub async fn find_by_account(
        pool: &PgPool,
        account_id: DbId,
    ) -> Result<Option<OnboardingProgress>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM onboarding_progress WHERE account_id = $1");
        sqlx::query_as::<_, OnboardingProgress>(&query)
            .bind(account_id)
            .fetch_optional(pool)
            .await
    }

    /// Write a new status only when it differs from the stored one, bumping
    /// `last_updated_at` on change.
    ///
    /// Returns `None` when the stored status already matched (no write).
    pub async fn set_status_if_changed(
        pool: &PgPool,
        account_id: DbId,
        status: &str,
    ) -> Result<Option<OnboardingProgress>, sqlx::Error> {
        let query = format!(
            "UPDATE onboarding_progress \
             SET onboarding_status = $2, last_updated_at = NOW() \
             WHERE account_id = $1 AND onboarding_status <> $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OnboardingProgress>(&query)
            .bind(account_id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Unconditionally set the status (explicit admin override), always
    /// bumping `last_updated_at`.
    ///
    /// Returns `None` if no progress record exists for the account.
    pub async fn set_status(
        pool: &PgPool,
        account_id: DbId,
        status: &str,
    ) -> Result<Option<OnboardingProgress>, sqlx::Error> {
        let query = format!(
            "UPDATE onboarding_progress \
             SET onboarding_status = $2, last_updated_at = NOW() \
             WHERE account_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OnboardingProgress>(&query)
            .bind(account_id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Aggregate view: progress rows joined with their accounts and role
    /// names, filtered and paginated. Inactive accounts are excluded.
    ///
    /// The WHERE clause is built dynamically from the present filters;
    /// binds follow the same order as the generated placeholders.
    pub async fn list_aggregate(
        pool: &PgPool,
        filter: &AggregateFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AggregateRow>, sqlx::Error> {
        let mut conditions: Vec<String> = vec!["a.is_active = true".to_string()];
        let mut param_idx: usize = 1;

        if filter.status.is_some() {
            conditions.push(format!("p.onboarding_status = ${param_idx}"));
            param_idx += 1;
        }
        if filter.department.is_some() {
            conditions.push(format!("a.department = ${param_idx}"));
            param_idx += 1;
        }
        if filter.role.is_some() {
            conditions.push(format!("r.name = ${param_idx}"));
            param_idx += 1;
        }

        let query = format!(
            "SELECT p.account_id, a.email, a.full_name, a.employee_id, a.department, \
                    a.position, r.name AS role, p.onboarding_status, p.started_at, \
                    p.last_updated_at \
             FROM onboarding_progress p \
             JOIN accounts a ON a.id = p.account_id \
             JOIN roles r ON r.id = a.role_id \
             WHERE {} \
             ORDER BY p.started_at DESC \
             LIMIT ${param_idx} OFFSET ${}",
            conditions.join(" AND "),
            param_idx + 1,
        );

        let mut q = sqlx::query_as::<_, AggregateRow>(&query);
        if let Some(ref status) = filter.status {
            q = q.bind(status);
        }
        if let Some(ref department) = filter.department {
            q = q.bind(department);
        }
        if let Some(ref role) = filter.role {
            q = q.bind(role);
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }
}
