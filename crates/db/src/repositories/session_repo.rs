//! Repository for the `identity_sessions` table.

use sqlx::PgPool;

use gangway_core::types::DbId;

use crate::models::session::{CreateSession, IdentitySession};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, identity_id, refresh_token_hash, expires_at, is_revoked, \
                        created_at, updated_at";

/// Provides CRUD operations for identity sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSession,
    ) -> Result<IdentitySession, sqlx::Error> {
        let query = format!(
            "INSERT INTO identity_sessions (identity_id, refresh_token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, IdentitySession>(&query)
            .bind(input.identity_id)
            .bind(&input.refresh_token_hash)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find an active (not revoked, not expired) session by refresh token
    /// hash.
    pub async fn find_active_by_token_hash(
        pool: &PgPool,
        hash: &str,
    ) -> Result<Option<IdentitySession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM identity_sessions
             WHERE refresh_token_hash = $1
               AND is_revoked = false
               AND expires_at > NOW()"
        );
        sqlx::query_as::<_, IdentitySession>(&query)
            .bind(hash)
            .fetch_optional(pool)
            .await
    }

    /// Revoke a single session. Returns `true` if the row was updated.
    pub async fn revoke(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE identity_sessions SET is_revoked = true WHERE id = $1 AND is_revoked = false",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Revoke all active sessions for an identity. Returns the count of
    /// revoked sessions.
    pub async fn revoke_all_for_identity(
        pool: &PgPool,
        identity_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE identity_sessions SET is_revoked = true
             WHERE identity_id = $1 AND is_revoked = false",
        )
        .bind(identity_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
