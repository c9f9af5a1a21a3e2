//! Postgres-backed identity provider.
//!
//! Credentials live in the `identities` table, entirely separate from the
//! profile rows in `accounts`. After [`IdentityProvider::create_identity`]
//! returns, the baseline profile row is materialized by a spawned task
//! rather than in the caller's request -- consumers must tolerate a window
//! where the identity exists but the profile row does not. The provisioner
//! covers that window with bounded polling and a fallback insert.

use std::time::Duration;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use async_trait::async_trait;
use chrono::Utc;
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use uuid::Uuid;

use gangway_core::error::CoreError;
use gangway_core::identity::{IdentityMetadata, IdentityProvider, SignIn, VerifiedIdentity};
use gangway_core::roles::ROLE_EMPLOYEE;
use gangway_core::types::DbId;

use crate::is_unique_violation;
use crate::models::identity::CreateIdentity;
use crate::models::session::CreateSession;
use crate::repositories::{AccountRepo, IdentityRepo, RoleRepo, SessionRepo};

/// Refresh token lifetime.
const REFRESH_TOKEN_TTL_DAYS: i64 = 7;

// ---------------------------------------------------------------------------
// Password hashing
// ---------------------------------------------------------------------------

/// Hash a plaintext password using Argon2id with a random salt, returning
/// the PHC-formatted string.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-formatted hash.
///
/// Returns `Ok(true)` if the password matches, `Ok(false)` if it does not.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

// ---------------------------------------------------------------------------
// Refresh tokens
// ---------------------------------------------------------------------------

/// Generate an opaque refresh token, returning `(plaintext, sha256_hash)`.
/// Only the hash is stored, so a database leak does not compromise active
/// sessions.
fn generate_refresh_token() -> (String, String) {
    let plaintext = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
    let hash = hash_refresh_token(&plaintext);
    (plaintext, hash)
}

/// SHA-256 hex digest of a refresh token.
fn hash_refresh_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    format!("{digest:x}")
}

// ---------------------------------------------------------------------------
// Provider
// ---------------------------------------------------------------------------

/// Identity provider over the application's own Postgres instance.
pub struct PgIdentityProvider {
    pool: PgPool,
    /// Artificial delay before baseline materialization. Used by tests to
    /// exercise the provisioner's polling and fallback-insert paths.
    materialization_delay: Option<Duration>,
}

impl PgIdentityProvider {
    pub fn new(pool: PgPool) -> Self {
        PgIdentityProvider {
            pool,
            materialization_delay: None,
        }
    }

    pub fn with_materialization_delay(pool: PgPool, delay: Duration) -> Self {
        PgIdentityProvider {
            pool,
            materialization_delay: Some(delay),
        }
    }

    /// Build a [`SignIn`] for an identity: open a session row and hand the
    /// plaintext refresh token back to the caller.
    async fn open_session(&self, id: DbId, email: &str) -> Result<SignIn, CoreError> {
        let (plaintext, hash) = generate_refresh_token();
        let expires_at = Utc::now() + chrono::Duration::days(REFRESH_TOKEN_TTL_DAYS);

        let input = CreateSession {
            identity_id: id,
            refresh_token_hash: hash,
            expires_at,
        };
        SessionRepo::create(&self.pool, &input)
            .await
            .map_err(|e| CoreError::Store(e.to_string()))?;

        Ok(SignIn {
            identity: VerifiedIdentity {
                id,
                email: email.to_string(),
            },
            refresh_token: plaintext,
            expires_at,
        })
    }
}

#[async_trait]
impl IdentityProvider for PgIdentityProvider {
    async fn create_identity(
        &self,
        email: &str,
        password: &str,
        metadata: &IdentityMetadata,
    ) -> Result<DbId, CoreError> {
        let password_hash = hash_password(password)
            .map_err(|e| CoreError::Provisioning(format!("Password hashing error: {e}")))?;
        let metadata_json = serde_json::to_value(metadata)
            .map_err(|e| CoreError::Provisioning(format!("Metadata encoding error: {e}")))?;

        let input = CreateIdentity {
            email: email.to_string(),
            password_hash,
            metadata_json,
        };
        let identity = match IdentityRepo::create(&self.pool, &input).await {
            Ok(identity) => identity,
            Err(e) if is_unique_violation(&e) => {
                return Err(CoreError::IdentityConflict(format!(
                    "Email '{email}' is already registered"
                )));
            }
            Err(e) => return Err(CoreError::Store(e.to_string())),
        };

        // Materialize the baseline profile row out-of-band. The provisioner
        // does not wait for this; it polls and falls back to its own insert.
        let pool = self.pool.clone();
        let delay = self.materialization_delay;
        let id = identity.id;
        let email = identity.email.clone();
        let metadata = metadata.clone();
        tokio::spawn(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            let role_id = match RoleRepo::id_of(&pool, &metadata.role).await {
                Ok(Some(role_id)) => role_id,
                Ok(None) => match RoleRepo::id_of(&pool, ROLE_EMPLOYEE).await {
                    Ok(Some(role_id)) => role_id,
                    _ => {
                        tracing::warn!(identity_id = id, "No role available for baseline profile");
                        return;
                    }
                },
                Err(e) => {
                    tracing::warn!(identity_id = id, error = %e, "Role lookup failed during materialization");
                    return;
                }
            };
            if let Err(e) =
                AccountRepo::insert_baseline(&pool, id, &email, role_id, &metadata.full_name).await
            {
                tracing::warn!(identity_id = id, error = %e, "Baseline profile materialization failed");
            } else {
                tracing::debug!(identity_id = id, "Baseline profile materialized");
            }
        });

        Ok(identity.id)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<SignIn, CoreError> {
        let identity = IdentityRepo::find_by_email(&self.pool, email)
            .await
            .map_err(|e| CoreError::Store(e.to_string()))?
            .ok_or_else(|| CoreError::Unauthorized("Invalid email or password".into()))?;

        if !identity.is_active {
            return Err(CoreError::Forbidden("Identity is deactivated".into()));
        }

        let password_valid = verify_password(password, &identity.password_hash)
            .map_err(|e| CoreError::Store(format!("Password verification error: {e}")))?;
        if !password_valid {
            return Err(CoreError::Unauthorized("Invalid email or password".into()));
        }

        self.open_session(identity.id, &identity.email).await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<SignIn, CoreError> {
        let hash = hash_refresh_token(refresh_token);
        let session = SessionRepo::find_active_by_token_hash(&self.pool, &hash)
            .await
            .map_err(|e| CoreError::Store(e.to_string()))?
            .ok_or_else(|| CoreError::Unauthorized("Invalid or expired refresh token".into()))?;

        // Token rotation: the presented token is spent either way.
        SessionRepo::revoke(&self.pool, session.id)
            .await
            .map_err(|e| CoreError::Store(e.to_string()))?;

        let identity = IdentityRepo::find_by_id(&self.pool, session.identity_id)
            .await
            .map_err(|e| CoreError::Store(e.to_string()))?
            .ok_or_else(|| CoreError::Unauthorized("Identity no longer exists".into()))?;

        if !identity.is_active {
            return Err(CoreError::Forbidden("Identity is deactivated".into()));
        }

        self.open_session(identity.id, &identity.email).await
    }

    async fn sign_out(&self, refresh_token: &str) -> Result<(), CoreError> {
        let hash = hash_refresh_token(refresh_token);
        if let Some(session) = SessionRepo::find_active_by_token_hash(&self.pool, &hash)
            .await
            .map_err(|e| CoreError::Store(e.to_string()))?
        {
            SessionRepo::revoke(&self.pool, session.id)
                .await
                .map_err(|e| CoreError::Store(e.to_string()))?;
        }
        Ok(())
    }

    async fn reset_password(&self, email: &str, new_password: &str) -> Result<(), CoreError> {
        let identity = IdentityRepo::find_by_email(&self.pool, email)
            .await
            .map_err(|e| CoreError::Store(e.to_string()))?
            .ok_or_else(|| CoreError::Store(format!("No identity record for email '{email}'")))?;

        let password_hash = hash_password(new_password)
            .map_err(|e| CoreError::Store(format!("Password hashing error: {e}")))?;
        IdentityRepo::update_password(&self.pool, identity.id, &password_hash)
            .await
            .map_err(|e| CoreError::Store(e.to_string()))?;

        // Force re-authentication everywhere after a password change.
        SessionRepo::revoke_all_for_identity(&self.pool, identity.id)
            .await
            .map_err(|e| CoreError::Store(e.to_string()))?;

        tracing::info!(identity_id = identity.id, "Password reset");
        Ok(())
    }
}
