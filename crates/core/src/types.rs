/// All database primary keys are PostgreSQL BIGSERIAL (account ids are
/// assigned by the identity store and share the same representation).
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar date without time-of-day (start dates, signature dates).
pub type Date = chrono::NaiveDate;

/// Catalog form type identifier, e.g. `"compliance-statement"`.
pub type FormTypeId = &'static str;
