//! Password input rules. Hashing and verification live with the identity
//! provider; this module only gates what the API accepts.

/// Minimum password length enforced on signup and password reset.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Validate that a password meets minimum strength requirements.
///
/// Returns `Ok(())` when the password is acceptable, or `Err` with a
/// human-readable explanation.
pub fn validate_password_strength(password: &str) -> Result<(), String> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_short_rejected() {
        let result = validate_password_strength("short");
        assert!(result.is_err());
        assert!(
            result.unwrap_err().contains("at least 8 characters"),
            "error message should state the minimum length"
        );
    }

    #[test]
    fn minimum_boundary_accepted() {
        assert!(validate_password_strength("12345678").is_ok());
        assert!(validate_password_strength("a-much-longer-password").is_ok());
    }
}
