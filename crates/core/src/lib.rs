//! Domain logic for the Gangway onboarding platform.
//!
//! This crate is I/O-free: it holds the error taxonomy, the form catalog,
//! the access-policy decision function, onboarding-status derivation, and
//! the trait seams for external collaborators (identity store, employee-ID
//! issuance). Persistence lives in `gangway-db`, HTTP in `gangway-api`.

pub mod catalog;
pub mod error;
pub mod identity;
pub mod pagination;
pub mod policy;
pub mod progress;
pub mod roles;
pub mod types;
