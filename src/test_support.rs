//! Shared fixtures for unit tests.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    middleware::auth::CallerContext,
    models::{
        account::{Account, AccountType},
        category::{Category, CategoryType},
        movement::{Movement, MovementType},
        profile::Role,
    },
    store::memory::MemoryStore,
};

pub fn admin() -> CallerContext {
    CallerContext {
        user_id: Uuid::new_v4(),
        role: Role::Admin,
        full_name: Some("Admin".to_string()),
    }
}

pub fn user() -> CallerContext {
    CallerContext {
        user_id: Uuid::new_v4(),
        role: Role::User,
        full_name: None,
    }
}

/// Ids of the rows [`seed`] inserts.
pub struct Fixtures {
    pub cash_account: Uuid,
    pub bank_account: Uuid,
    pub income_category: Uuid,
    pub expense_category: Uuid,
}

fn account(name: &str, kind: AccountType) -> Account {
    Account {
        id: Uuid::new_v4(),
        name: name.to_string(),
        kind,
        description: None,
        active: true,
        created_by: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn category(name: &str, kind: CategoryType) -> Category {
    Category {
        id: Uuid::new_v4(),
        name: name.to_string(),
        kind,
        parent_id: None,
        description: None,
        active: true,
        created_by: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Two active accounts (cash first) and one category per type.
pub fn seed(store: &MemoryStore) -> Fixtures {
    let cash = account("Caja", AccountType::Cash);
    let bank = account("Banco", AccountType::Bank);
    let salary = category("Salario", CategoryType::Income);
    let food = category("Comida", CategoryType::Expense);

    let fixtures = Fixtures {
        cash_account: cash.id,
        bank_account: bank.id,
        income_category: salary.id,
        expense_category: food.id,
    };

    let mut state = store.state();
    state.accounts.extend([cash, bank]);
    state.categories.extend([salary, food]);
    fixtures
}

/// Insert a movement of 100 dated 2024-03-01 straight into the store.
pub fn insert_movement(store: &MemoryStore, kind: MovementType, category_id: Uuid) -> Uuid {
    let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap_or_default();
    insert_dated(store, kind, Decimal::ONE_HUNDRED, date, category_id)
}

/// Insert a movement against the first seeded account, bypassing the
/// service layer.
pub fn insert_dated(
    store: &MemoryStore,
    kind: MovementType,
    amount: Decimal,
    date: NaiveDate,
    category_id: Uuid,
) -> Uuid {
    let mut state = store.state();
    let account_id = state.accounts.first().map(|a| a.id);
    let (origin, destination) = match kind {
        MovementType::Income => (None, account_id),
        MovementType::Expense => (account_id, None),
        MovementType::Transfer => (account_id, state.accounts.get(1).map(|a| a.id)),
    };
    let movement = Movement {
        id: Uuid::new_v4(),
        kind,
        amount,
        date,
        origin_account_id: origin,
        destination_account_id: destination,
        category_id: (kind != MovementType::Transfer).then_some(category_id),
        description: None,
        voided: false,
        voided_at: None,
        void_reason: None,
        created_by: Uuid::new_v4(),
        created_at: Utc::now(),
    };
    let id = movement.id;
    state.movements.push(movement);
    id
}
