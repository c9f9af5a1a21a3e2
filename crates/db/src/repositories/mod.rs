//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Repositories return raw
//! `sqlx::Error`; classification into domain errors (duplicate submission,
//! identity conflict) happens at the caller where the intent is known.

pub mod account_repo;
pub mod identity_repo;
pub mod progress_repo;
pub mod role_repo;
pub mod session_repo;
pub mod submission_repo;

pub use account_repo::AccountRepo;
pub use identity_repo::IdentityRepo;
pub use progress_repo::ProgressRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use submission_repo::SubmissionRepo;
