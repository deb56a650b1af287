//! Account management HTTP handlers.
//!
//! This module implements the account-related API endpoints:
//! - GET /api/v1/accounts - List accounts (active only unless `include_inactive=true`)
//! - POST /api/v1/accounts - Create account (admin)
//! - GET /api/v1/accounts/balances - Active accounts with their balance
//! - GET /api/v1/accounts/{id} - Get account by ID
//! - PUT /api/v1/accounts/{id} - Update account (admin)
//! - POST /api/v1/accounts/{id}/toggle - Enable or disable account (admin)

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    error::AppError,
    extract::AppJson,
    middleware::auth::CallerContext,
    models::account::{Account, AccountBalance, AccountInput, AccountListQuery},
    services::account_service,
    store::SharedStore,
};

/// Create a new account.
///
/// # Endpoint
///
/// `POST /api/v1/accounts`
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Caja menor",
///   "type": "cash",
///   "description": "Petty cash"
/// }
/// ```
///
/// # Response
///
/// - **Success (201 Created)**: the created account, active
/// - **Error (403)**: caller is not an admin
/// - **Error (422)**: field errors
/// - **Error (502)**: the store rejected the insert
pub async fn create_account(
    State(store): State<SharedStore>,
    Extension(caller): Extension<CallerContext>,
    AppJson(input): AppJson<AccountInput>,
) -> Result<(StatusCode, Json<Account>), AppError> {
    let account = account_service::create_account(store.as_ref(), &caller, &input).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

/// List accounts ordered by name.
pub async fn list_accounts(
    State(store): State<SharedStore>,
    Query(query): Query<AccountListQuery>,
) -> Result<Json<Vec<Account>>, AppError> {
    let accounts = account_service::list_accounts(store.as_ref(), query.include_inactive).await?;
    Ok(Json(accounts))
}

/// Active accounts with their balance.
///
/// # Endpoint
///
/// `GET /api/v1/accounts/balances`
///
/// # Response (200 OK)
///
/// ```json
/// [
///   {
///     "id": "550e8400-e29b-41d4-a716-446655440000",
///     "name": "Banco",
///     "type": "bank",
///     "active": true,
///     "balance": "1500000.00"
///   }
/// ]
/// ```
pub async fn list_account_balances(
    State(store): State<SharedStore>,
) -> Result<Json<Vec<AccountBalance>>, AppError> {
    let balances = account_service::list_account_balances(store.as_ref()).await?;
    Ok(Json(balances))
}

/// Get a specific account by ID.
///
/// Returns 404 if the account does not exist.
pub async fn get_account(
    State(store): State<SharedStore>,
    Path(account_id): Path<Uuid>,
) -> Result<Json<Account>, AppError> {
    let account = account_service::get_account(store.as_ref(), account_id).await?;
    Ok(Json(account))
}

/// Replace name, type and description of an account.
pub async fn update_account(
    State(store): State<SharedStore>,
    Extension(caller): Extension<CallerContext>,
    Path(account_id): Path<Uuid>,
    AppJson(input): AppJson<AccountInput>,
) -> Result<Json<Account>, AppError> {
    let account =
        account_service::update_account(store.as_ref(), &caller, account_id, &input).await?;
    Ok(Json(account))
}

/// Flip the `active` flag of an account.
///
/// Disabled accounts keep their movements and still count toward the
/// global balance, but can no longer be referenced by new movements.
pub async fn toggle_account_status(
    State(store): State<SharedStore>,
    Extension(caller): Extension<CallerContext>,
    Path(account_id): Path<Uuid>,
) -> Result<Json<Account>, AppError> {
    let account =
        account_service::toggle_account_status(store.as_ref(), &caller, account_id).await?;
    Ok(Json(account))
}
