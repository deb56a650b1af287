//! Account data models and API request/response types.
//!
//! This module defines:
//! - `Account`: Database entity representing a holding (cash, bank, card, wallet)
//! - `AccountBalance`: Row of the `vista_saldos_cuentas` read model
//! - `AccountInput`: Raw request body for creating or updating accounts
//! - `NewAccount`: Validated account ready for persistence

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of holding an account represents.
///
/// Serialized in English on the API; stored with the labels of the
/// `tipo_cuenta` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "tipo_cuenta")]
pub enum AccountType {
    #[sqlx(rename = "efectivo")]
    Cash,
    #[sqlx(rename = "banco")]
    Bank,
    #[sqlx(rename = "tarjeta")]
    Card,
    #[sqlx(rename = "billetera")]
    Wallet,
}

impl AccountType {
    pub const ALL: [AccountType; 4] = [Self::Cash, Self::Bank, Self::Card, Self::Wallet];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Bank => "bank",
            Self::Card => "card",
            Self::Wallet => "wallet",
        }
    }

    /// Parse the API spelling of an account type.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

/// Represents an account record from the `cuentas` table.
///
/// Accounts are never deleted. Disabling one flips `active` to false and
/// every read filters on that flag explicitly.
///
/// The balance is not a column: it is derived by the store from the
/// account's non-voided movements (see [`AccountBalance`]).
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize)]
pub struct Account {
    pub id: Uuid,

    #[sqlx(rename = "nombre")]
    pub name: String,

    #[sqlx(rename = "tipo")]
    #[serde(rename = "type")]
    pub kind: AccountType,

    #[sqlx(rename = "descripcion")]
    pub description: Option<String>,

    #[sqlx(rename = "activa")]
    pub active: bool,

    /// Admin who created the account (NULL for rows seeded directly in the store)
    pub created_by: Option<Uuid>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Account with its derived balance, read from `vista_saldos_cuentas`.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize)]
pub struct AccountBalance {
    pub id: Uuid,

    #[sqlx(rename = "nombre")]
    pub name: String,

    #[sqlx(rename = "tipo")]
    #[serde(rename = "type")]
    pub kind: AccountType,

    #[sqlx(rename = "activa")]
    pub active: bool,

    /// Current balance: inflows minus outflows of non-voided movements
    #[sqlx(rename = "saldo")]
    pub balance: Decimal,

    pub created_at: DateTime<Utc>,
}

/// Request body for creating or updating an account.
///
/// Every field is optional at the deserialization level so that a missing
/// field surfaces as a field error from the validation layer instead of a
/// generic JSON rejection.
///
/// # JSON Example
///
/// ```json
/// {
///   "name": "Caja menor",
///   "type": "cash",
///   "description": "Petty cash in the office"
/// }
/// ```
#[derive(Debug, Default, Clone, Deserialize)]
pub struct AccountInput {
    pub name: Option<String>,

    #[serde(rename = "type")]
    pub kind: Option<String>,

    pub description: Option<String>,
}

/// Validated account fields, ready to be inserted or applied as an update.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    pub name: String,
    pub kind: AccountType,
    pub description: Option<String>,
}

/// Query string for listing accounts.
#[derive(Debug, Default, Deserialize)]
pub struct AccountListQuery {
    /// Also return disabled accounts
    #[serde(default)]
    pub include_inactive: bool,
}
