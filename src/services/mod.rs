//! Business logic services.
//!
//! The pure layers (validation, movement rules, category hierarchy, report
//! aggregation) hold no state and never touch the store. The `*_service`
//! modules orchestrate them: caller check → validation → rules → store.

pub mod category_tree;
pub mod movement_rules;
pub mod report;
pub mod validation;

pub mod account_service;
pub mod category_service;
pub mod dashboard_service;
pub mod movement_service;

use crate::error::AppError;

/// Map a failed store write to a single user-facing message.
///
/// The write is considered not applied and is never retried.
pub(crate) fn store_failure(message: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |err| {
        tracing::error!(error = %err, "{}", message);
        AppError::StoreFailure(message.to_string())
    }
}
