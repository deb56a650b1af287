//! Account service - creation, update and soft disabling of accounts.
//!
//! Only admins may change accounts. Accounts are never deleted; disabling
//! one hides it from every active listing while its movements keep counting
//! towards the global balance.

use uuid::Uuid;

use crate::{
    error::AppError,
    middleware::auth::CallerContext,
    models::account::{Account, AccountBalance, AccountInput},
    services::{store_failure, validation::validate_account},
    store::LedgerStore,
};

/// Create an active account.
///
/// # Errors
///
/// - `Forbidden`: caller is not an admin
/// - `Validation`: name too short or unknown type
/// - `StoreFailure`: the store rejected the insert
pub async fn create_account(
    store: &dyn LedgerStore,
    caller: &CallerContext,
    input: &AccountInput,
) -> Result<Account, AppError> {
    caller.require_admin()?;
    let account = validate_account(input)?;

    let created = store
        .insert_account(&account, caller.user_id)
        .await
        .map_err(store_failure("Could not create the account"))?;

    tracing::info!(account_id = %created.id, kind = created.kind.as_str(), "account created");
    Ok(created)
}

/// Replace name, type and description of an account.
pub async fn update_account(
    store: &dyn LedgerStore,
    caller: &CallerContext,
    id: Uuid,
    input: &AccountInput,
) -> Result<Account, AppError> {
    caller.require_admin()?;
    let account = validate_account(input)?;

    store
        .update_account(id, &account)
        .await
        .map_err(store_failure("Could not update the account"))?
        .ok_or(AppError::NotFound("Account"))
}

/// Enable a disabled account or disable an enabled one.
pub async fn toggle_account_status(
    store: &dyn LedgerStore,
    caller: &CallerContext,
    id: Uuid,
) -> Result<Account, AppError> {
    caller.require_admin()?;

    let account = store
        .toggle_account_active(id)
        .await
        .map_err(store_failure("Could not change the account status"))?
        .ok_or(AppError::NotFound("Account"))?;

    tracing::info!(account_id = %id, active = account.active, "account status changed");
    Ok(account)
}

pub async fn get_account(store: &dyn LedgerStore, id: Uuid) -> Result<Account, AppError> {
    store
        .get_account(id)
        .await?
        .ok_or(AppError::NotFound("Account"))
}

pub async fn list_accounts(
    store: &dyn LedgerStore,
    include_inactive: bool,
) -> Result<Vec<Account>, AppError> {
    Ok(store.list_accounts(include_inactive).await?)
}

/// Active accounts with their balance as computed by the store.
pub async fn list_account_balances(
    store: &dyn LedgerStore,
) -> Result<Vec<AccountBalance>, AppError> {
    Ok(store.list_account_balances().await?)
}
