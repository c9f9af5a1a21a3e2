//! Identity (credential) record model.

use sqlx::FromRow;

use gangway_core::types::{DbId, Timestamp};

/// A row from the `identities` table.
///
/// Contains the password hash -- this struct deliberately does not derive
/// `Serialize` and must never cross the provider boundary.
#[derive(Debug, Clone, FromRow)]
pub struct Identity {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    /// Profile fields captured at creation, used for baseline
    /// materialization.
    pub metadata_json: serde_json::Value,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a new identity.
#[derive(Debug)]
pub struct CreateIdentity {
    pub email: String,
    pub password_hash: String,
    pub metadata_json: serde_json::Value,
}
