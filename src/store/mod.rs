//! Boundary to the relational store.
//!
//! Durable state, balance computation and the atomic void operation live in
//! the store. Services reach it only through [`LedgerStore`], so handlers
//! share one `Arc<dyn LedgerStore>` and tests swap in an in-memory store.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{
    account::{Account, AccountBalance, NewAccount},
    category::{Category, NewCategory},
    movement::{Movement, MovementAmount, MovementDetail, NewMovement},
    profile::Principal,
    report::DateWindow,
};

pub mod postgres;

#[cfg(test)]
pub mod memory;

pub type StoreResult<T> = Result<T, sqlx::Error>;

/// Store shared by every handler.
pub type SharedStore = Arc<dyn LedgerStore>;

/// Operations the ledger needs from the store.
///
/// Reads filter soft-deleted rows explicitly; nothing is ever hard-deleted.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Cheap connectivity check.
    async fn ping(&self) -> StoreResult<()>;

    /// Resolve a hashed API key to its active profile.
    async fn find_principal(&self, key_hash: &str) -> StoreResult<Option<Principal>>;

    /// Accounts ordered by name; inactive ones only when asked for.
    async fn list_accounts(&self, include_inactive: bool) -> StoreResult<Vec<Account>>;

    async fn get_account(&self, id: Uuid) -> StoreResult<Option<Account>>;

    /// Active accounts with their derived balance, ordered by name.
    async fn list_account_balances(&self) -> StoreResult<Vec<AccountBalance>>;

    /// Insert an active account.
    async fn insert_account(&self, account: &NewAccount, created_by: Uuid) -> StoreResult<Account>;

    async fn update_account(&self, id: Uuid, account: &NewAccount)
    -> StoreResult<Option<Account>>;

    /// Flip the active flag, returning the updated account.
    async fn toggle_account_active(&self, id: Uuid) -> StoreResult<Option<Account>>;

    /// Categories ordered by name; inactive ones only when asked for.
    async fn list_categories(&self, include_inactive: bool) -> StoreResult<Vec<Category>>;

    async fn get_category(&self, id: Uuid) -> StoreResult<Option<Category>>;

    /// Insert an active category.
    async fn insert_category(
        &self,
        category: &NewCategory,
        created_by: Uuid,
    ) -> StoreResult<Category>;

    async fn update_category(
        &self,
        id: Uuid,
        category: &NewCategory,
    ) -> StoreResult<Option<Category>>;

    /// Number of non-voided movements classified under the category.
    async fn count_active_movements_in_category(&self, id: Uuid) -> StoreResult<i64>;

    /// Soft delete. Returns false when the category does not exist.
    async fn deactivate_category(&self, id: Uuid) -> StoreResult<bool>;

    async fn insert_movement(
        &self,
        movement: &NewMovement,
        created_by: Uuid,
    ) -> StoreResult<Movement>;

    async fn get_movement(&self, id: Uuid) -> StoreResult<Option<Movement>>;

    /// Denormalized movements, newest first (date, then creation time).
    async fn list_movement_details(
        &self,
        include_voided: bool,
        limit: i64,
    ) -> StoreResult<Vec<MovementDetail>>;

    /// Date, type and amount of every non-voided movement inside `window`.
    async fn movement_amounts(&self, window: Option<DateWindow>)
    -> StoreResult<Vec<MovementAmount>>;

    /// Global balance across all accounts (`calcular_saldo_total`).
    async fn total_balance(&self) -> StoreResult<Decimal>;

    /// Atomically void a movement (`anular_movimiento`).
    ///
    /// Returns false when the movement is unknown or already voided.
    async fn void_movement(&self, id: Uuid, reason: &str) -> StoreResult<bool>;
}
