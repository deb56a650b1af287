//! Data models representing database entities and API payloads.

/// Accounts (cuentas)
pub mod account;
/// Categories (categorías) and their one-level hierarchy
pub mod category;
/// Movements: income, expense, transfer
pub mod movement;
/// Caller identity resolved from API keys
pub mod profile;
/// Dashboard statistics and chart series
pub mod report;
