//! Identity session model and DTOs.

use sqlx::FromRow;

use gangway_core::types::{DbId, Timestamp};

/// A row from the `identity_sessions` table. Only the SHA-256 hash of the
/// refresh token is stored; the plaintext exists solely in the sign-in
/// response.
#[derive(Debug, Clone, FromRow)]
pub struct IdentitySession {
    pub id: DbId,
    pub identity_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for opening a new session.
#[derive(Debug)]
pub struct CreateSession {
    pub identity_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}
