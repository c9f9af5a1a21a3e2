//! Role lookup-table model.

use serde::Serialize;
use sqlx::FromRow;

use gangway_core::types::{DbId, Timestamp};

/// A row from the `roles` table. Seeded by migration; never written at
/// runtime.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Role {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
