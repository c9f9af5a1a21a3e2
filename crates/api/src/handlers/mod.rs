pub mod admin;
pub mod auth;
pub mod employees;
pub mod me;
pub mod onboarding;

use gangway_db::models::account::{Account, AccountResponse};
use gangway_db::repositories::RoleRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// Build an [`AccountResponse`] with the role name resolved.
pub(crate) async fn account_response(
    state: &AppState,
    account: &Account,
) -> AppResult<AccountResponse> {
    let role = RoleRepo::resolve_name(&state.pool, account.role_id).await?;
    Ok(AccountResponse::from_account(account, role))
}
