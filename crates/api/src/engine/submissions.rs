//! The form-submission ledger: validated, at-most-once recording with
//! synchronous status recomputation.

use std::collections::BTreeMap;

use serde::Deserialize;

use gangway_core::error::CoreError;
use gangway_core::pagination::{clamp_page_size, page_offset};
use gangway_core::policy::{authorize, AccessAction};
use gangway_core::types::{Date, DbId};
use gangway_db::models::submission::{CreateSubmission, FormSubmission, SubmissionFilter};
use gangway_db::repositories::SubmissionRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

use super::progress;

/// Deserialized submission body: type-specific fields plus the mandatory
/// electronic signature pair.
#[derive(Debug, Deserialize)]
pub struct SubmitForm {
    #[serde(default)]
    pub fields: serde_json::Map<String, serde_json::Value>,
    pub signature: String,
    pub signature_date: Date,
}

/// Record one form submission for an employee.
///
/// The form type must exist in the catalog and the fields must satisfy its
/// schema. A duplicate (employee, form type) pair is rejected -- a signed
/// compliance document is never silently overwritten; amending one would
/// be a distinct operation. On success the aggregate status is recomputed
/// before returning, so the caller observes consistent state.
pub async fn submit(
    state: &AppState,
    actor: &AuthUser,
    account_id: DbId,
    form_type: &str,
    input: SubmitForm,
) -> AppResult<FormSubmission> {
    authorize(
        &actor.role,
        actor.account_id,
        account_id,
        AccessAction::SubmitForm,
    )?;

    let descriptor = state
        .catalog
        .get(form_type)
        .ok_or_else(|| CoreError::Validation(format!("Unknown form type '{form_type}'")))?;

    if input.signature.trim().is_empty() {
        return Err(CoreError::invalid_field("signature", "must be a non-empty string").into());
    }
    descriptor.validate_fields(&input.fields)?;

    progress::require_employee(state, account_id).await?;

    let create = CreateSubmission {
        account_id,
        form_type: descriptor.id.to_string(),
        fields_json: serde_json::Value::Object(input.fields),
        signature: input.signature,
        signature_date: input.signature_date,
    };
    let submission = match SubmissionRepo::create(&state.pool, &create).await {
        Ok(submission) => submission,
        Err(e) if gangway_db::is_unique_violation(&e) => {
            return Err(CoreError::DuplicateSubmission {
                account_id,
                form_type: form_type.to_string(),
            }
            .into());
        }
        Err(e) => return Err(e.into()),
    };

    progress::recompute_status(state, account_id).await?;

    tracing::info!(account_id, form_type, "Form submission recorded");
    Ok(submission)
}

/// All submissions for one employee, keyed by form type. Types without a
/// submission are omitted rather than nulled.
pub async fn list_for_employee(
    state: &AppState,
    actor: &AuthUser,
    account_id: DbId,
) -> AppResult<BTreeMap<String, FormSubmission>> {
    authorize(
        &actor.role,
        actor.account_id,
        account_id,
        AccessAction::ReadSubmissions,
    )?;
    progress::require_employee(state, account_id).await?;

    let submissions = SubmissionRepo::list_for_account(&state.pool, account_id).await?;
    Ok(submissions
        .into_iter()
        .map(|s| (s.form_type.clone(), s))
        .collect())
}

/// Privileged audit listing across all employees.
pub async fn list_all(
    state: &AppState,
    actor: &AuthUser,
    filter: SubmissionFilter,
    page: Option<i64>,
    page_size: Option<i64>,
) -> AppResult<Vec<FormSubmission>> {
    authorize(
        &actor.role,
        actor.account_id,
        actor.account_id,
        AccessAction::ReadAggregate,
    )?;

    if let Some(ref form_type) = filter.form_type {
        if !state.catalog.contains(form_type) {
            return Err(CoreError::Validation(format!("Unknown form type '{form_type}'")).into());
        }
    }

    let limit = clamp_page_size(page_size);
    let offset = page_offset(page, limit);
    Ok(SubmissionRepo::list_all(&state.pool, &filter, limit, offset).await?)
}
