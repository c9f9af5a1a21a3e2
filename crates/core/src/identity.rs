//! Collaborator seams: the identity store and employee-ID issuance.
//!
//! Credentials live with the identity provider, never with the profile
//! data, and the rest of the system only sees these traits. The caller of
//! every operation is resolved upstream (bearer token -> id + role); no
//! module here resolves identity itself.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{Date, DbId, Timestamp};

/// Profile fields embedded as metadata on the identity record at creation
/// time. The provider uses them to materialize the baseline profile row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityMetadata {
    pub full_name: String,
    pub role: String,
    pub department: Option<String>,
    pub position: Option<String>,
    pub start_date: Option<Date>,
}

/// An identity whose credentials have been verified.
#[derive(Debug, Clone)]
pub struct VerifiedIdentity {
    pub id: DbId,
    pub email: String,
}

/// An open session: the verified identity plus an opaque refresh token.
/// Access-token issuance is the transport layer's concern.
#[derive(Debug, Clone)]
pub struct SignIn {
    pub identity: VerifiedIdentity,
    pub refresh_token: String,
    pub expires_at: Timestamp,
}

/// External identity store.
///
/// `create_identity` returns once the credential record exists; the
/// provider materializes the baseline profile row through its own
/// side-effect mechanism, which is NOT guaranteed to have completed by
/// then. Consumers must tolerate a window where the identity exists but
/// the profile row does not.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Register credentials for a new account. Fails with
    /// [`CoreError::IdentityConflict`] when the email is already taken.
    async fn create_identity(
        &self,
        email: &str,
        password: &str,
        metadata: &IdentityMetadata,
    ) -> Result<DbId, CoreError>;

    /// Verify credentials and open a session.
    async fn sign_in(&self, email: &str, password: &str) -> Result<SignIn, CoreError>;

    /// Rotate a refresh token, revoking the session it belonged to.
    async fn refresh(&self, refresh_token: &str) -> Result<SignIn, CoreError>;

    /// Revoke the session bound to the given refresh token.
    async fn sign_out(&self, refresh_token: &str) -> Result<(), CoreError>;

    /// Replace the password for an existing identity and revoke all of its
    /// open sessions.
    async fn reset_password(&self, email: &str, new_password: &str) -> Result<(), CoreError>;
}

/// Issues globally unique employee identifiers. Uniqueness is the
/// generator's contract; the caller only surfaces generator failure.
#[async_trait]
pub trait EmployeeIdGenerator: Send + Sync {
    async fn next(&self) -> Result<String, CoreError>;
}

/// Default generator: `EMP-` followed by eight random alphanumerics.
pub struct RandomEmployeeIdGenerator;

#[async_trait]
impl EmployeeIdGenerator for RandomEmployeeIdGenerator {
    async fn next(&self) -> Result<String, CoreError> {
        use rand::distr::Alphanumeric;
        use rand::Rng;

        let suffix: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(8)
            .map(char::from)
            .collect();
        Ok(format!("EMP-{suffix}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn generated_ids_have_prefix_and_length() {
        let generator = RandomEmployeeIdGenerator;
        let id = generator.next().await.unwrap();
        assert!(id.starts_with("EMP-"));
        assert_eq!(id.len(), 12);
    }

    #[tokio::test]
    async fn consecutive_ids_differ() {
        let generator = RandomEmployeeIdGenerator;
        let a = generator.next().await.unwrap();
        let b = generator.next().await.unwrap();
        assert_ne!(a, b);
    }
}
