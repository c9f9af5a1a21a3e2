//! Role/ownership authorization decisions.
//!
//! Every operation that can touch another employee's records goes through
//! [`authorize`] so the rules live in one unit-testable function instead of
//! being repeated across handlers. Denied reads return `Forbidden` rather
//! than masquerading as not-found; callers that must hide record existence
//! should map both outcomes to the same response shape.

use crate::error::CoreError;
use crate::roles::{is_privileged, ROLE_ADMIN};
use crate::types::DbId;

/// What the actor is attempting against the target account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessAction {
    /// Read one employee's onboarding progress.
    ReadProgress,
    /// Read one employee's form submissions.
    ReadSubmissions,
    /// Record a form submission on an employee's ledger.
    SubmitForm,
    /// Read an account's profile record.
    ReadAccount,
    /// Mutate privileged account fields (role, is_active) or deactivate.
    ManageAccount,
    /// Override or reset an employee's derived onboarding status.
    OverrideProgress,
    /// List progress or submissions across all employees.
    ReadAggregate,
}

/// Decide whether `actor` may perform `action` against `target`.
///
/// - Employees may read and write only their own records.
/// - Managers and admins may read any employee's records and aggregates.
/// - Only admins may manage accounts or override progress.
/// - Form submissions are strictly self-service for every role: a signed
///   compliance document must come from its subject.
///
/// For aggregate listings the target is not meaningful; callers pass the
/// actor's own id.
pub fn authorize(
    actor_role: &str,
    actor_id: DbId,
    target_account_id: DbId,
    action: AccessAction,
) -> Result<(), CoreError> {
    let is_self = actor_id == target_account_id;
    let allowed = match action {
        AccessAction::SubmitForm => is_self,
        AccessAction::ReadProgress | AccessAction::ReadSubmissions | AccessAction::ReadAccount => {
            is_self || is_privileged(actor_role)
        }
        AccessAction::ReadAggregate => is_privileged(actor_role),
        AccessAction::ManageAccount | AccessAction::OverrideProgress => actor_role == ROLE_ADMIN,
    };

    if allowed {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "Role '{actor_role}' may not perform this action on account {target_account_id}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::{ROLE_EMPLOYEE, ROLE_MANAGER};

    const ALICE: DbId = 10;
    const BOB: DbId = 20;

    #[test]
    fn employee_reads_own_records() {
        assert!(authorize(ROLE_EMPLOYEE, ALICE, ALICE, AccessAction::ReadProgress).is_ok());
        assert!(authorize(ROLE_EMPLOYEE, ALICE, ALICE, AccessAction::ReadSubmissions).is_ok());
        assert!(authorize(ROLE_EMPLOYEE, ALICE, ALICE, AccessAction::SubmitForm).is_ok());
    }

    #[test]
    fn employee_denied_cross_employee_access() {
        for action in [
            AccessAction::ReadProgress,
            AccessAction::ReadSubmissions,
            AccessAction::SubmitForm,
            AccessAction::ReadAccount,
        ] {
            assert!(
                authorize(ROLE_EMPLOYEE, ALICE, BOB, action).is_err(),
                "employee should be denied {action:?} on another account"
            );
        }
    }

    #[test]
    fn manager_reads_any_but_cannot_mutate() {
        assert!(authorize(ROLE_MANAGER, ALICE, BOB, AccessAction::ReadProgress).is_ok());
        assert!(authorize(ROLE_MANAGER, ALICE, BOB, AccessAction::ReadSubmissions).is_ok());
        assert!(authorize(ROLE_MANAGER, ALICE, ALICE, AccessAction::ReadAggregate).is_ok());

        assert!(authorize(ROLE_MANAGER, ALICE, BOB, AccessAction::ManageAccount).is_err());
        assert!(authorize(ROLE_MANAGER, ALICE, BOB, AccessAction::OverrideProgress).is_err());
    }

    #[test]
    fn nobody_submits_on_behalf_of_another() {
        assert!(authorize(ROLE_MANAGER, ALICE, BOB, AccessAction::SubmitForm).is_err());
        assert!(authorize(ROLE_ADMIN, ALICE, BOB, AccessAction::SubmitForm).is_err());
    }

    #[test]
    fn admin_has_full_management_access() {
        assert!(authorize(ROLE_ADMIN, ALICE, BOB, AccessAction::ReadProgress).is_ok());
        assert!(authorize(ROLE_ADMIN, ALICE, BOB, AccessAction::ManageAccount).is_ok());
        assert!(authorize(ROLE_ADMIN, ALICE, BOB, AccessAction::OverrideProgress).is_ok());
        assert!(authorize(ROLE_ADMIN, ALICE, ALICE, AccessAction::ReadAggregate).is_ok());
    }

    #[test]
    fn employee_denied_aggregate_listing() {
        assert!(authorize(ROLE_EMPLOYEE, ALICE, ALICE, AccessAction::ReadAggregate).is_err());
    }

    #[test]
    fn unknown_role_gets_nothing_beyond_self_reads() {
        assert!(authorize("contractor", ALICE, ALICE, AccessAction::ReadProgress).is_ok());
        assert!(authorize("contractor", ALICE, BOB, AccessAction::ReadProgress).is_err());
        assert!(authorize("contractor", ALICE, ALICE, AccessAction::ReadAggregate).is_err());
    }
}
