//! Onboarding workflow engine.
//!
//! Multi-step operations that span repositories: account provisioning,
//! progress tracking, and the form-submission ledger. Handlers stay thin;
//! engine functions take the resolved caller, enforce the access policy,
//! and return domain results with typed errors, so every workflow can be
//! exercised without the HTTP layer.

pub mod progress;
pub mod provisioner;
pub mod submissions;
