//! Repository for the `accounts` table.
//!
//! The provisioner's update-or-insert protocol is modeled as two explicit
//! operations with identical final row shape: [`AccountRepo::apply_profile`]
//! (the expected path once the baseline row has materialized) and
//! [`AccountRepo::insert_profile`] (the fallback when it has not). A unique
//! violation on the fallback means the row appeared concurrently; the
//! caller re-applies and the existing row wins.

use sqlx::PgPool;

use gangway_core::types::DbId;

use crate::models::account::{Account, ProfileFields, UpdateAccount};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, role_id, full_name, employee_id, department, \
                        position, start_date, is_active, created_at, updated_at";

/// Provides CRUD operations for accounts.
pub struct AccountRepo;

impl AccountRepo {
    /// Find an account by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE id = $1");
        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an account by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE email = $1");
        sqlx::query_as::<_, Account>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Apply the full provisioning profile to an existing row.
    ///
    /// Returns `None` when the row has not materialized yet -- the caller
    /// decides whether to poll again or fall back to an insert.
    pub async fn apply_profile(
        pool: &PgPool,
        id: DbId,
        fields: &ProfileFields,
    ) -> Result<Option<Account>, sqlx::Error> {
        let query = format!(
            "UPDATE accounts SET
                role_id = $2,
                full_name = $3,
                employee_id = $4,
                department = $5,
                position = $6,
                start_date = $7
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .bind(fields.role_id)
            .bind(&fields.full_name)
            .bind(&fields.employee_id)
            .bind(&fields.department)
            .bind(&fields.position)
            .bind(fields.start_date)
            .fetch_optional(pool)
            .await
    }

    /// Fallback insert of the complete profile row, keyed by identity id.
    ///
    /// Produces the same final shape as [`Self::apply_profile`]. A unique
    /// violation on the primary key means the baseline row materialized
    /// concurrently.
    pub async fn insert_profile(
        pool: &PgPool,
        id: DbId,
        email: &str,
        fields: &ProfileFields,
    ) -> Result<Account, sqlx::Error> {
        let query = format!(
            "INSERT INTO accounts (id, email, role_id, full_name, employee_id, department, position, start_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .bind(email)
            .bind(fields.role_id)
            .bind(&fields.full_name)
            .bind(&fields.employee_id)
            .bind(&fields.department)
            .bind(&fields.position)
            .bind(fields.start_date)
            .fetch_one(pool)
            .await
    }

    /// Baseline insert used by the identity provider's materialization
    /// task. A no-op when the provisioner's fallback insert won the race;
    /// the targetless conflict clause covers both the id and email
    /// constraints, which always point at the same existing row.
    pub async fn insert_baseline(
        pool: &PgPool,
        id: DbId,
        email: &str,
        role_id: DbId,
        full_name: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO accounts (id, email, role_id, full_name)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT DO NOTHING",
        )
        .bind(id)
        .bind(email)
        .bind(role_id)
        .bind(full_name)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Update an account. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAccount,
    ) -> Result<Option<Account>, sqlx::Error> {
        let query = format!(
            "UPDATE accounts SET
                full_name = COALESCE($2, full_name),
                department = COALESCE($3, department),
                position = COALESCE($4, position),
                start_date = COALESCE($5, start_date),
                role_id = COALESCE($6, role_id),
                is_active = COALESCE($7, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .bind(&input.full_name)
            .bind(&input.department)
            .bind(&input.position)
            .bind(input.start_date)
            .bind(input.role_id)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Soft-deactivate an account. Accounts are never physically deleted.
    ///
    /// Returns `true` if the row was updated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE accounts SET is_active = false WHERE id = $1 AND is_active = true")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List all accounts ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts ORDER BY created_at DESC");
        sqlx::query_as::<_, Account>(&query).fetch_all(pool).await
    }
}
