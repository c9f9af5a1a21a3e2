//! Repository for the `identities` table. Used only by the identity
//! provider; nothing outside `crate::identity` should touch credentials.

use sqlx::PgPool;

use gangway_core::types::DbId;

use crate::models::identity::{CreateIdentity, Identity};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password_hash, metadata_json, is_active, \
                        created_at, updated_at";

/// Provides CRUD operations for identities.
pub struct IdentityRepo;

impl IdentityRepo {
    /// Insert a new identity, returning the created row.
    ///
    /// Surfaces the raw unique violation on a duplicate email; the
    /// provider maps it to an identity conflict.
    pub async fn create(pool: &PgPool, input: &CreateIdentity) -> Result<Identity, sqlx::Error> {
        let query = format!(
            "INSERT INTO identities (email, password_hash, metadata_json)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Identity>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.metadata_json)
            .fetch_one(pool)
            .await
    }

    /// Find an identity by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Identity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM identities WHERE id = $1");
        sqlx::query_as::<_, Identity>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an identity by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Identity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM identities WHERE email = $1");
        sqlx::query_as::<_, Identity>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Replace an identity's password hash. Returns `true` if the row was
    /// updated.
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE identities SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
