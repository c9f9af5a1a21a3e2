use crate::types::DbId;

/// Domain error taxonomy.
///
/// Every operation in the workflow engine returns one of these kinds; the
/// HTTP layer maps them to status codes without inspecting messages. The
/// only error that is ever converted to success is a duplicate-key
/// violation on an idempotent create, and that conversion happens at the
/// call site, never here.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A form field failed its catalog schema check. Always names the
    /// first offending field so the caller can correct it.
    #[error("Invalid field '{field}': {message}")]
    InvalidField { field: String, message: String },

    /// The (employee, form type) pair already has a recorded submission.
    #[error("Form '{form_type}' already submitted for account {account_id}")]
    DuplicateSubmission { account_id: DbId, form_type: String },

    /// The identity store already holds a credential for this email.
    #[error("Identity conflict: {0}")]
    IdentityConflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A dependent service failed during signup. Partial state (an
    /// orphaned identity) may remain and is logged for reconciliation.
    #[error("Provisioning failed: {0}")]
    Provisioning(String),

    /// The bounded wait for profile-row materialization was exhausted.
    #[error("Provisioning timed out: {0}")]
    ProvisioningTimeout(String),

    /// Generic backing-store failure with the store detail sanitized away
    /// from non-admin callers by the HTTP layer.
    #[error("Store error: {0}")]
    Store(String),
}

impl CoreError {
    /// Shorthand for a field-level validation failure.
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        CoreError::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }
}
