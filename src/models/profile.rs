//! Caller identity model.
//!
//! Profiles are provisioned in the store together with their API keys.
//! Keys are stored as SHA-256 hashes; the auth middleware hashes the bearer
//! token and resolves it to a [`Principal`].

use serde::Serialize;
use uuid::Uuid;

/// Role of a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "rol_usuario")]
pub enum Role {
    #[sqlx(rename = "admin")]
    Admin,
    #[sqlx(rename = "usuario")]
    User,
}

/// Active profile resolved from an active API key.
///
/// Joins `api_keys` and `profiles`; only rows where both are active are
/// ever returned by the store.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Principal {
    /// Profile id
    pub id: Uuid,

    pub email: String,

    #[sqlx(rename = "nombre_completo")]
    pub full_name: Option<String>,

    #[sqlx(rename = "rol")]
    pub role: Role,
}
