//! In-memory [`LedgerStore`] for tests.
//!
//! Mirrors the store's views and functions closely enough for service and
//! router tests, and records the calls that tests assert on.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    middleware::auth::hash_api_key,
    models::{
        account::{Account, AccountBalance, NewAccount},
        category::{Category, NewCategory},
        movement::{Movement, MovementAmount, MovementDetail, MovementType, NewMovement},
        profile::Principal,
        report::DateWindow,
    },
    store::{LedgerStore, StoreResult},
};

#[derive(Debug, Default)]
pub struct MemoryState {
    pub principals: Vec<(String, Principal)>,
    pub accounts: Vec<Account>,
    pub categories: Vec<Category>,
    pub movements: Vec<Movement>,
    /// Makes every write fail as if the store rejected it
    pub fail_writes: bool,
    pub movement_inserts: usize,
    pub void_calls: Vec<(Uuid, String)>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap()
    }

    pub fn add_principal(&self, api_key: &str, principal: Principal) {
        self.state()
            .principals
            .push((hash_api_key(api_key), principal));
    }

    fn check_writable(state: &MemoryState) -> StoreResult<()> {
        if state.fail_writes {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(())
    }

    fn balance_of(movements: &[Movement], account_id: Uuid) -> Decimal {
        movements
            .iter()
            .filter(|m| !m.voided)
            .map(|m| {
                if m.destination_account_id == Some(account_id) {
                    m.amount
                } else if m.origin_account_id == Some(account_id) {
                    -m.amount
                } else {
                    Decimal::ZERO
                }
            })
            .sum()
    }
}

#[async_trait]
impl LedgerStore for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn find_principal(&self, key_hash: &str) -> StoreResult<Option<Principal>> {
        Ok(self
            .state()
            .principals
            .iter()
            .find(|(hash, _)| hash == key_hash)
            .map(|(_, principal)| principal.clone()))
    }

    async fn list_accounts(&self, include_inactive: bool) -> StoreResult<Vec<Account>> {
        let mut accounts: Vec<_> = self
            .state()
            .accounts
            .iter()
            .filter(|a| include_inactive || a.active)
            .cloned()
            .collect();
        accounts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(accounts)
    }

    async fn get_account(&self, id: Uuid) -> StoreResult<Option<Account>> {
        Ok(self.state().accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn list_account_balances(&self) -> StoreResult<Vec<AccountBalance>> {
        let state = self.state();
        let mut balances: Vec<_> = state
            .accounts
            .iter()
            .filter(|a| a.active)
            .map(|a| AccountBalance {
                id: a.id,
                name: a.name.clone(),
                kind: a.kind,
                active: a.active,
                balance: Self::balance_of(&state.movements, a.id),
                created_at: a.created_at,
            })
            .collect();
        balances.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(balances)
    }

    async fn insert_account(&self, account: &NewAccount, created_by: Uuid) -> StoreResult<Account> {
        let mut state = self.state();
        Self::check_writable(&state)?;
        let now = Utc::now();
        let account = Account {
            id: Uuid::new_v4(),
            name: account.name.clone(),
            kind: account.kind,
            description: account.description.clone(),
            active: true,
            created_by: Some(created_by),
            created_at: now,
            updated_at: now,
        };
        state.accounts.push(account.clone());
        Ok(account)
    }

    async fn update_account(
        &self,
        id: Uuid,
        account: &NewAccount,
    ) -> StoreResult<Option<Account>> {
        let mut state = self.state();
        Self::check_writable(&state)?;
        Ok(state.accounts.iter_mut().find(|a| a.id == id).map(|stored| {
            stored.name = account.name.clone();
            stored.kind = account.kind;
            stored.description = account.description.clone();
            stored.updated_at = Utc::now();
            stored.clone()
        }))
    }

    async fn toggle_account_active(&self, id: Uuid) -> StoreResult<Option<Account>> {
        let mut state = self.state();
        Self::check_writable(&state)?;
        Ok(state.accounts.iter_mut().find(|a| a.id == id).map(|stored| {
            stored.active = !stored.active;
            stored.clone()
        }))
    }

    async fn list_categories(&self, include_inactive: bool) -> StoreResult<Vec<Category>> {
        let mut categories: Vec<_> = self
            .state()
            .categories
            .iter()
            .filter(|c| include_inactive || c.active)
            .cloned()
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn get_category(&self, id: Uuid) -> StoreResult<Option<Category>> {
        Ok(self.state().categories.iter().find(|c| c.id == id).cloned())
    }

    async fn insert_category(
        &self,
        category: &NewCategory,
        created_by: Uuid,
    ) -> StoreResult<Category> {
        let mut state = self.state();
        Self::check_writable(&state)?;
        let now = Utc::now();
        let category = Category {
            id: Uuid::new_v4(),
            name: category.name.clone(),
            kind: category.kind,
            parent_id: category.parent_id,
            description: category.description.clone(),
            active: true,
            created_by: Some(created_by),
            created_at: now,
            updated_at: now,
        };
        state.categories.push(category.clone());
        Ok(category)
    }

    async fn update_category(
        &self,
        id: Uuid,
        category: &NewCategory,
    ) -> StoreResult<Option<Category>> {
        let mut state = self.state();
        Self::check_writable(&state)?;
        Ok(state.categories.iter_mut().find(|c| c.id == id).map(|stored| {
            stored.name = category.name.clone();
            stored.kind = category.kind;
            stored.parent_id = category.parent_id;
            stored.description = category.description.clone();
            stored.updated_at = Utc::now();
            stored.clone()
        }))
    }

    async fn count_active_movements_in_category(&self, id: Uuid) -> StoreResult<i64> {
        let count = self
            .state()
            .movements
            .iter()
            .filter(|m| m.category_id == Some(id) && !m.voided)
            .count();
        Ok(count as i64)
    }

    async fn deactivate_category(&self, id: Uuid) -> StoreResult<bool> {
        let mut state = self.state();
        Self::check_writable(&state)?;
        Ok(state
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .map(|stored| stored.active = false)
            .is_some())
    }

    async fn insert_movement(
        &self,
        movement: &NewMovement,
        created_by: Uuid,
    ) -> StoreResult<Movement> {
        let mut state = self.state();
        state.movement_inserts += 1;
        Self::check_writable(&state)?;
        let movement = Movement {
            id: Uuid::new_v4(),
            kind: movement.kind,
            amount: movement.amount,
            date: movement.date,
            origin_account_id: movement.origin_account_id,
            destination_account_id: movement.destination_account_id,
            category_id: movement.category_id,
            description: movement.description.clone(),
            voided: false,
            voided_at: None,
            void_reason: None,
            created_by,
            created_at: Utc::now(),
        };
        state.movements.push(movement.clone());
        Ok(movement)
    }

    async fn get_movement(&self, id: Uuid) -> StoreResult<Option<Movement>> {
        Ok(self.state().movements.iter().find(|m| m.id == id).cloned())
    }

    async fn list_movement_details(
        &self,
        include_voided: bool,
        limit: i64,
    ) -> StoreResult<Vec<MovementDetail>> {
        let state = self.state();
        let account_name = |id: Option<Uuid>| {
            id.and_then(|id| state.accounts.iter().find(|a| a.id == id))
                .map(|a| a.name.clone())
        };
        let category_name = |id: Option<Uuid>| {
            id.and_then(|id| state.categories.iter().find(|c| c.id == id))
                .map(|c| c.name.clone())
        };

        let mut movements: Vec<_> = state
            .movements
            .iter()
            .filter(|m| include_voided || !m.voided)
            .collect();
        movements.sort_by(|a, b| (b.date, b.created_at).cmp(&(a.date, a.created_at)));

        Ok(movements
            .into_iter()
            .take(usize::try_from(limit).unwrap_or(0))
            .map(|m| MovementDetail {
                id: m.id,
                kind: m.kind,
                amount: m.amount,
                date: m.date,
                description: m.description.clone(),
                voided: m.voided,
                void_reason: m.void_reason.clone(),
                origin_account_name: account_name(m.origin_account_id),
                destination_account_name: account_name(m.destination_account_id),
                category_name: category_name(m.category_id),
                created_by: m.created_by,
                created_by_name: state
                    .principals
                    .iter()
                    .find(|(_, p)| p.id == m.created_by)
                    .and_then(|(_, p)| p.full_name.clone()),
                created_at: m.created_at,
            })
            .collect())
    }

    async fn movement_amounts(
        &self,
        window: Option<DateWindow>,
    ) -> StoreResult<Vec<MovementAmount>> {
        Ok(self
            .state()
            .movements
            .iter()
            .filter(|m| !m.voided)
            .filter(|m| window.is_none_or(|w| w.start <= m.date && m.date <= w.end))
            .map(|m| MovementAmount {
                date: m.date.to_string(),
                kind: m.kind,
                amount: m.amount,
            })
            .collect())
    }

    async fn total_balance(&self) -> StoreResult<Decimal> {
        Ok(self
            .state()
            .movements
            .iter()
            .filter(|m| !m.voided)
            .map(|m| match m.kind {
                MovementType::Income => m.amount,
                MovementType::Expense => -m.amount,
                MovementType::Transfer => Decimal::ZERO,
            })
            .sum())
    }

    async fn void_movement(&self, id: Uuid, reason: &str) -> StoreResult<bool> {
        let mut state = self.state();
        state.void_calls.push((id, reason.to_string()));
        Self::check_writable(&state)?;
        Ok(state
            .movements
            .iter_mut()
            .find(|m| m.id == id && !m.voided)
            .map(|stored| {
                stored.voided = true;
                stored.voided_at = Some(Utc::now());
                stored.void_reason = Some(reason.to_string());
            })
            .is_some())
    }
}
