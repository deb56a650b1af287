//! Movement data models and API request/response types.
//!
//! This module defines:
//! - `Movement`: Database entity for a ledger entry (income, expense, transfer)
//! - `MovementDetail`: Row of the `vista_movimientos_completos` read model
//! - `MovementInput` / `MovementDraft` / `NewMovement`: the three stages a
//!   movement goes through on creation (raw, schema-checked, rule-normalized)
//! - `MovementAmount`: the minimal projection the report aggregator consumes

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Type of movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "tipo_movimiento")]
pub enum MovementType {
    /// Money entering a destination account
    #[sqlx(rename = "ingreso")]
    Income,
    /// Money leaving an origin account
    #[sqlx(rename = "egreso")]
    Expense,
    /// Money moving from an origin account to a distinct destination account
    #[sqlx(rename = "transferencia")]
    Transfer,
}

impl MovementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Transfer => "transfer",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            "transfer" => Some(Self::Transfer),
            _ => None,
        }
    }
}

/// Represents a movement record from the `movimientos` table.
///
/// # Account Cardinality
///
/// - income: `origin_account_id` is NULL, destination and category are set
/// - expense: `destination_account_id` is NULL, origin and category are set
/// - transfer: both accounts set and distinct, `category_id` is NULL
///
/// # Lifecycle
///
/// A movement is immutable once inserted. The only transition is
/// active → voided, which records `voided_at` and `void_reason` and removes
/// the movement from every balance and report.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize)]
pub struct Movement {
    pub id: Uuid,

    #[sqlx(rename = "tipo")]
    #[serde(rename = "type")]
    pub kind: MovementType,

    /// Positive amount, two decimal places
    #[sqlx(rename = "monto")]
    pub amount: Decimal,

    #[sqlx(rename = "fecha")]
    pub date: NaiveDate,

    #[sqlx(rename = "cuenta_origen_id")]
    pub origin_account_id: Option<Uuid>,

    #[sqlx(rename = "cuenta_destino_id")]
    pub destination_account_id: Option<Uuid>,

    #[sqlx(rename = "categoria_id")]
    pub category_id: Option<Uuid>,

    #[sqlx(rename = "descripcion")]
    pub description: Option<String>,

    #[sqlx(rename = "anulado")]
    pub voided: bool,

    #[sqlx(rename = "fecha_anulacion")]
    pub voided_at: Option<DateTime<Utc>>,

    #[sqlx(rename = "motivo_anulacion")]
    pub void_reason: Option<String>,

    pub created_by: Uuid,

    pub created_at: DateTime<Utc>,
}

/// Movement with resolved account, category and creator names.
///
/// Read from `vista_movimientos_completos`.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize)]
pub struct MovementDetail {
    pub id: Uuid,

    #[sqlx(rename = "tipo")]
    #[serde(rename = "type")]
    pub kind: MovementType,

    #[sqlx(rename = "monto")]
    pub amount: Decimal,

    #[sqlx(rename = "fecha")]
    pub date: NaiveDate,

    #[sqlx(rename = "descripcion")]
    pub description: Option<String>,

    #[sqlx(rename = "anulado")]
    pub voided: bool,

    #[sqlx(rename = "motivo_anulacion")]
    pub void_reason: Option<String>,

    #[sqlx(rename = "cuenta_origen_nombre")]
    pub origin_account_name: Option<String>,

    #[sqlx(rename = "cuenta_destino_nombre")]
    pub destination_account_name: Option<String>,

    #[sqlx(rename = "categoria_nombre")]
    pub category_name: Option<String>,

    pub created_by: Uuid,

    #[sqlx(rename = "creado_por_nombre")]
    pub created_by_name: Option<String>,

    pub created_at: DateTime<Utc>,
}

/// Request body for creating a movement.
///
/// `amount` is kept as a raw JSON value so that both `50000` and `"50000.50"`
/// are accepted and parsed exactly, without going through a binary float.
///
/// # JSON Example
///
/// ```json
/// {
///   "type": "income",
///   "amount": 50000,
///   "date": "2024-03-01",
///   "destination_account_id": "550e8400-e29b-41d4-a716-446655440000",
///   "category_id": "660e8400-e29b-41d4-a716-446655440001"
/// }
/// ```
#[derive(Debug, Default, Clone, Deserialize)]
pub struct MovementInput {
    #[serde(rename = "type")]
    pub kind: Option<String>,

    pub amount: Option<serde_json::Value>,

    pub date: Option<String>,

    pub description: Option<String>,

    pub origin_account_id: Option<String>,

    pub destination_account_id: Option<String>,

    pub category_id: Option<String>,
}

/// Movement that passed schema validation.
///
/// Account and category references are still optional here; which of them
/// are required depends on the movement type and is decided by the rules
/// engine.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementDraft {
    pub kind: MovementType,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub origin_account_id: Option<Uuid>,
    pub destination_account_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
}

/// Movement normalized by the rules engine, ready for insertion.
///
/// Fields that are forbidden for `kind` are guaranteed to be `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMovement {
    pub kind: MovementType,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub origin_account_id: Option<Uuid>,
    pub destination_account_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
}

/// Date, type and amount of a non-voided movement.
///
/// `date` is the store's textual rendering of the movement date. The
/// aggregator buckets on its calendar-day prefix.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct MovementAmount {
    #[sqlx(rename = "fecha")]
    pub date: String,

    #[sqlx(rename = "tipo")]
    pub kind: MovementType,

    #[sqlx(rename = "monto")]
    pub amount: Decimal,
}

/// Request body for voiding a movement.
#[derive(Debug, Default, Deserialize)]
pub struct VoidMovementRequest {
    pub reason: Option<String>,
}

/// Query string for listing movements.
#[derive(Debug, Default, Deserialize)]
pub struct MovementListQuery {
    pub limit: Option<i64>,

    #[serde(default)]
    pub include_voided: Option<bool>,
}
