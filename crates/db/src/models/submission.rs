//! Form submission (ledger entry) model and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use gangway_core::types::{Date, DbId, Timestamp};

/// A row from the `form_submissions` table. At most one exists per
/// (account, form type); the unique constraint is the arbiter.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct FormSubmission {
    pub id: DbId,
    pub account_id: DbId,
    pub form_type: String,
    /// Form-type-specific fields, already validated against the catalog
    /// schema at submission time.
    pub fields_json: serde_json::Value,
    pub signature: String,
    pub signature_date: Date,
    pub submitted_at: Timestamp,
}

/// DTO for recording a submission.
#[derive(Debug, Clone)]
pub struct CreateSubmission {
    pub account_id: DbId,
    pub form_type: String,
    pub fields_json: serde_json::Value,
    pub signature: String,
    pub signature_date: Date,
}

/// Filters accepted by the privileged audit listing.
#[derive(Debug, Default, Clone)]
pub struct SubmissionFilter {
    pub form_type: Option<String>,
    pub account_id: Option<DbId>,
}
