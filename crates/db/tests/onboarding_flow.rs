//! Integration tests for the onboarding persistence layer.
//!
//! Exercises the repositories against a real database:
//! - Idempotent progress creation under sequential and concurrent calls
//! - The ledger's one-submission-per-(account, form type) constraint
//! - The provisioner's update-or-insert building blocks
//! - Aggregate-view filtering

use sqlx::PgPool;

use gangway_core::types::DbId;
use gangway_db::models::account::ProfileFields;
use gangway_db::models::identity::CreateIdentity;
use gangway_db::models::progress::AggregateFilter;
use gangway_db::models::submission::CreateSubmission;
use gangway_db::repositories::{
    AccountRepo, IdentityRepo, ProgressRepo, RoleRepo, SubmissionRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Insert an identity row directly, returning its id. The hash is not a
/// real password hash; these tests never sign in.
async fn create_identity(pool: &PgPool, email: &str) -> DbId {
    let input = CreateIdentity {
        email: email.to_string(),
        password_hash: "unused".to_string(),
        metadata_json: serde_json::json!({}),
    };
    IdentityRepo::create(pool, &input)
        .await
        .expect("identity creation should succeed")
        .id
}

/// Profile fields for an employee account.
async fn employee_fields(pool: &PgPool, employee_id: &str, department: &str) -> ProfileFields {
    let role_id = RoleRepo::id_of(pool, "employee")
        .await
        .expect("role lookup should succeed")
        .expect("employee role is seeded");
    ProfileFields {
        role_id,
        full_name: "Test Employee".to_string(),
        employee_id: Some(employee_id.to_string()),
        department: Some(department.to_string()),
        position: Some("Nurse".to_string()),
        start_date: None,
    }
}

/// Create an identity plus a fully provisioned employee account.
async fn create_employee(pool: &PgPool, email: &str, employee_id: &str, department: &str) -> DbId {
    let id = create_identity(pool, email).await;
    let fields = employee_fields(pool, employee_id, department).await;
    AccountRepo::insert_profile(pool, id, email, &fields)
        .await
        .expect("profile insert should succeed");
    id
}

fn submission_for(account_id: DbId, form_type: &str) -> CreateSubmission {
    CreateSubmission {
        account_id,
        form_type: form_type.to_string(),
        fields_json: serde_json::json!({ "contact_name": "Dana Park" }),
        signature: "Dana Park".to_string(),
        signature_date: "2026-08-01".parse().unwrap(),
    }
}

// ---------------------------------------------------------------------------
// Progress idempotency
// ---------------------------------------------------------------------------

/// Repeated ensure calls return the same record with the original
/// started_at.
#[sqlx::test(migrations = "../../db/migrations")]
async fn ensure_progress_is_idempotent(pool: PgPool) {
    let account_id = create_employee(&pool, "a@x.com", "EMP-00000001", "Nursing").await;

    let first = ProgressRepo::ensure(&pool, account_id).await.unwrap();
    let second = ProgressRepo::ensure(&pool, account_id).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(first.started_at, second.started_at);
    assert_eq!(first.onboarding_status, "pending");
}

/// Concurrent ensure calls for the same account yield exactly one row.
#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_ensure_creates_one_row(pool: PgPool) {
    let account_id = create_employee(&pool, "b@x.com", "EMP-00000002", "Nursing").await;

    let (left, right) = tokio::join!(
        ProgressRepo::ensure(&pool, account_id),
        ProgressRepo::ensure(&pool, account_id),
    );
    let left = left.unwrap();
    let right = right.unwrap();

    assert_eq!(left.id, right.id);
    assert_eq!(left.started_at, right.started_at);

    let count: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM onboarding_progress WHERE account_id = $1")
            .bind(account_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count.0, 1);
}

// ---------------------------------------------------------------------------
// Submission uniqueness
// ---------------------------------------------------------------------------

/// A second submission for the same (account, form type) hits the unique
/// constraint and leaves the original untouched.
#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_submission_rejected(pool: PgPool) {
    let account_id = create_employee(&pool, "c@x.com", "EMP-00000003", "Nursing").await;

    let original = SubmissionRepo::create(&pool, &submission_for(account_id, "emergency-contact"))
        .await
        .unwrap();

    let mut duplicate = submission_for(account_id, "emergency-contact");
    duplicate.signature = "Someone Else".to_string();
    let err = SubmissionRepo::create(&pool, &duplicate).await.unwrap_err();
    assert!(
        gangway_db::is_unique_violation(&err),
        "expected a unique violation, got {err:?}"
    );

    let stored = SubmissionRepo::find_by_account_and_type(&pool, account_id, "emergency-contact")
        .await
        .unwrap()
        .expect("original submission should still exist");
    assert_eq!(stored, original);
}

/// The same form type on two different accounts is fine.
#[sqlx::test(migrations = "../../db/migrations")]
async fn same_form_different_accounts_allowed(pool: PgPool) {
    let first = create_employee(&pool, "d@x.com", "EMP-00000004", "Nursing").await;
    let second = create_employee(&pool, "e@x.com", "EMP-00000005", "Nursing").await;

    SubmissionRepo::create(&pool, &submission_for(first, "emergency-contact"))
        .await
        .unwrap();
    SubmissionRepo::create(&pool, &submission_for(second, "emergency-contact"))
        .await
        .unwrap();

    assert_eq!(
        SubmissionRepo::submitted_types(&pool, first).await.unwrap(),
        vec!["emergency-contact".to_string()]
    );
}

// ---------------------------------------------------------------------------
// Update-or-insert building blocks
// ---------------------------------------------------------------------------

/// Before the baseline row exists the update path reports no row; the
/// fallback insert then produces the full shape, and a later update
/// converges on the identical row.
#[sqlx::test(migrations = "../../db/migrations")]
async fn apply_profile_misses_until_row_exists(pool: PgPool) {
    let id = create_identity(&pool, "f@x.com").await;
    let fields = employee_fields(&pool, "EMP-00000006", "Nursing").await;

    let missing = AccountRepo::apply_profile(&pool, id, &fields).await.unwrap();
    assert!(missing.is_none(), "no profile row has materialized yet");

    let inserted = AccountRepo::insert_profile(&pool, id, "f@x.com", &fields)
        .await
        .unwrap();
    assert_eq!(inserted.employee_id.as_deref(), Some("EMP-00000006"));

    let updated = AccountRepo::apply_profile(&pool, id, &fields)
        .await
        .unwrap()
        .expect("row exists now");
    assert_eq!(updated.id, inserted.id);
    assert_eq!(updated.full_name, inserted.full_name);
    assert_eq!(updated.employee_id, inserted.employee_id);
}

/// The baseline insert is a no-op when the full profile already exists.
#[sqlx::test(migrations = "../../db/migrations")]
async fn baseline_insert_never_clobbers(pool: PgPool) {
    let id = create_identity(&pool, "g@x.com").await;
    let fields = employee_fields(&pool, "EMP-00000007", "Nursing").await;
    let full = AccountRepo::insert_profile(&pool, id, "g@x.com", &fields)
        .await
        .unwrap();

    AccountRepo::insert_baseline(&pool, id, "g@x.com", fields.role_id, "Baseline Name")
        .await
        .unwrap();

    let after = AccountRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(after.full_name, full.full_name);
    assert_eq!(after.employee_id, full.employee_id);
}

/// Employee ids are unique across accounts.
#[sqlx::test(migrations = "../../db/migrations")]
async fn employee_id_is_unique(pool: PgPool) {
    create_employee(&pool, "h@x.com", "EMP-DUP", "Nursing").await;

    let id = create_identity(&pool, "i@x.com").await;
    let fields = employee_fields(&pool, "EMP-DUP", "Nursing").await;
    let err = AccountRepo::insert_profile(&pool, id, "i@x.com", &fields)
        .await
        .unwrap_err();
    assert!(gangway_db::is_unique_violation(&err));
}

// ---------------------------------------------------------------------------
// Aggregate view
// ---------------------------------------------------------------------------

/// Filters compose with AND and pagination bounds the page.
#[sqlx::test(migrations = "../../db/migrations")]
async fn aggregate_view_filters_by_status_and_department(pool: PgPool) {
    let nursing = create_employee(&pool, "j@x.com", "EMP-00000008", "Nursing").await;
    let radiology = create_employee(&pool, "k@x.com", "EMP-00000009", "Radiology").await;

    ProgressRepo::ensure(&pool, nursing).await.unwrap();
    ProgressRepo::ensure(&pool, radiology).await.unwrap();
    ProgressRepo::set_status_if_changed(&pool, nursing, "completed")
        .await
        .unwrap();

    let filter = AggregateFilter {
        status: Some("completed".to_string()),
        department: Some("Nursing".to_string()),
        role: None,
    };
    let rows = ProgressRepo::list_aggregate(&pool, &filter, 100, 0)
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].account_id, nursing);
    assert_eq!(rows[0].onboarding_status, "completed");
    assert_eq!(rows[0].department.as_deref(), Some("Nursing"));
    assert_eq!(rows[0].role, "employee");

    let none = ProgressRepo::list_aggregate(
        &pool,
        &AggregateFilter {
            status: Some("completed".to_string()),
            department: Some("Radiology".to_string()),
            role: None,
        },
        100,
        0,
    )
    .await
    .unwrap();
    assert!(none.is_empty());
}

/// Deactivated accounts drop out of the aggregate view.
#[sqlx::test(migrations = "../../db/migrations")]
async fn aggregate_view_excludes_inactive_accounts(pool: PgPool) {
    let account_id = create_employee(&pool, "l@x.com", "EMP-00000010", "Nursing").await;
    ProgressRepo::ensure(&pool, account_id).await.unwrap();

    AccountRepo::deactivate(&pool, account_id).await.unwrap();

    let rows = ProgressRepo::list_aggregate(&pool, &AggregateFilter::default(), 100, 0)
        .await
        .unwrap();
    assert!(rows.is_empty());
}
