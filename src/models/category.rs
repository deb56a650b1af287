//! Category data models and API request/response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether a category classifies income or expense movements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "tipo_categoria")]
pub enum CategoryType {
    #[sqlx(rename = "ingreso")]
    Income,
    #[sqlx(rename = "egreso")]
    Expense,
}

impl CategoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }
}

/// Represents a category record from the `categorias` table.
///
/// # Hierarchy
///
/// A category may point at a parent of the same type. Only one level of
/// nesting exists: a category with a parent never has children of its own.
/// The schema does not enforce this; the category service does when a
/// parent is chosen (see `services::category_tree::parent_candidates`).
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize)]
pub struct Category {
    pub id: Uuid,

    #[sqlx(rename = "nombre")]
    pub name: String,

    #[sqlx(rename = "tipo")]
    #[serde(rename = "type")]
    pub kind: CategoryType,

    pub parent_id: Option<Uuid>,

    #[sqlx(rename = "descripcion")]
    pub description: Option<String>,

    /// Soft-delete flag
    #[sqlx(rename = "activa")]
    pub active: bool,

    pub created_by: Option<Uuid>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or updating a category.
///
/// # JSON Example
///
/// ```json
/// {
///   "name": "Servicios",
///   "type": "expense",
///   "parent_id": "550e8400-e29b-41d4-a716-446655440000"
/// }
/// ```
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CategoryInput {
    pub name: Option<String>,

    #[serde(rename = "type")]
    pub kind: Option<String>,

    /// Parent category; blank or absent means top-level
    pub parent_id: Option<String>,

    pub description: Option<String>,
}

/// Validated category fields.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub name: String,
    pub kind: CategoryType,
    pub parent_id: Option<Uuid>,
    pub description: Option<String>,
}

/// A top-level category together with its direct sub-categories.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryNode {
    #[serde(flatten)]
    pub category: Category,

    pub children: Vec<Category>,
}

/// Active categories grouped by type, one level deep.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryTree {
    pub income: Vec<CategoryNode>,
    pub expense: Vec<CategoryNode>,
}

/// Query string for the parent-candidate listing.
#[derive(Debug, Deserialize)]
pub struct ParentCandidatesQuery {
    #[serde(rename = "type")]
    pub kind: String,

    /// Category being edited, excluded from its own candidates
    pub exclude: Option<Uuid>,
}
