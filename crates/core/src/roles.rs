//! Well-known role name constants.
//!
//! These must match the seed data in the `create_roles_table` migration.

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_EMPLOYEE: &str = "employee";

/// All roles an account can carry.
pub const ALL_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_MANAGER, ROLE_EMPLOYEE];

/// Roles assignable through the privileged signup surface. Employee
/// accounts are only ever created through self-signup, which forces the
/// role and never consults this list.
pub const PRIVILEGED_SIGNUP_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_MANAGER];

/// True for roles with elevated read access (manager, admin).
pub fn is_privileged(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_MANAGER
}

/// Validate a role requested through the privileged signup surface.
pub fn validate_privileged_signup_role(role: &str) -> Result<(), CoreError> {
    if PRIVILEGED_SIGNUP_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Role '{role}' cannot be assigned here. Must be one of: {PRIVILEGED_SIGNUP_ROLES:?}"
        )))
    }
}
