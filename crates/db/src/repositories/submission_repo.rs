//! Repository for the `form_submissions` table.
//!
//! The ledger is insert-only: a duplicate (account, form type) pair fails
//! the `uq_form_submissions_account_form` constraint and the caller maps
//! that to a duplicate-submission error. There is no update path -- a
//! signed compliance document is never silently overwritten.

use sqlx::PgPool;

use gangway_core::types::DbId;

use crate::models::submission::{CreateSubmission, FormSubmission, SubmissionFilter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, account_id, form_type, fields_json, signature, \
                        signature_date, submitted_at";

/// Provides insert/read operations for form submissions.
pub struct SubmissionRepo;

impl SubmissionRepo {
    /// Record a submission, returning the created row.
    ///
    /// Surfaces the raw unique violation on duplicates; classification
    /// happens at the engine layer.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSubmission,
    ) -> Result<FormSubmission, sqlx::Error> {
        let query = format!(
            "INSERT INTO form_submissions (account_id, form_type, fields_json, signature, signature_date)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FormSubmission>(&query)
            .bind(input.account_id)
            .bind(&input.form_type)
            .bind(&input.fields_json)
            .bind(&input.signature)
            .bind(input.signature_date)
            .fetch_one(pool)
            .await
    }

    /// Find one submission by account and form type.
    pub async fn find_by_account_and_type(
        pool: &PgPool,
        account_id: DbId,
        form_type: &str,
    ) -> Result<Option<FormSubmission>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM form_submissions WHERE account_id = $1 AND form_type = $2");
        sqlx::query_as::<_, FormSubmission>(&query)
            .bind(account_id)
            .bind(form_type)
            .fetch_optional(pool)
            .await
    }

    /// All submissions for one account, in catalog-agnostic submission
    /// order.
    pub async fn list_for_account(
        pool: &PgPool,
        account_id: DbId,
    ) -> Result<Vec<FormSubmission>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM form_submissions WHERE account_id = $1 ORDER BY submitted_at ASC"
        );
        sqlx::query_as::<_, FormSubmission>(&query)
            .bind(account_id)
            .fetch_all(pool)
            .await
    }

    /// The distinct form types an account has submitted. Input to status
    /// derivation.
    pub async fn submitted_types(
        pool: &PgPool,
        account_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT form_type FROM form_submissions WHERE account_id = $1")
                .bind(account_id)
                .fetch_all(pool)
                .await?;
        Ok(rows.into_iter().map(|(t,)| t).collect())
    }

    /// Audit listing across all employees, filtered and paginated, newest
    /// first.
    pub async fn list_all(
        pool: &PgPool,
        filter: &SubmissionFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<FormSubmission>, sqlx::Error> {
        let mut conditions: Vec<String> = vec!["TRUE".to_string()];
        let mut param_idx: usize = 1;

        if filter.form_type.is_some() {
            conditions.push(format!("form_type = ${param_idx}"));
            param_idx += 1;
        }
        if filter.account_id.is_some() {
            conditions.push(format!("account_id = ${param_idx}"));
            param_idx += 1;
        }

        let query = format!(
            "SELECT {COLUMNS} FROM form_submissions \
             WHERE {} \
             ORDER BY submitted_at DESC \
             LIMIT ${param_idx} OFFSET ${}",
            conditions.join(" AND "),
            param_idx + 1,
        );

        let mut q = sqlx::query_as::<_, FormSubmission>(&query);
        if let Some(ref form_type) = filter.form_type {
            q = q.bind(form_type);
        }
        if let Some(account_id) = filter.account_id {
            q = q.bind(account_id);
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }
}
