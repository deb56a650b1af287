//! Movement service - recording and voiding ledger movements.
//!
//! # Creation
//!
//! 1. Schema validation (`validation::validate_movement`)
//! 2. Type rules and normalization (`movement_rules::apply_movement_rules`)
//! 3. Reference checks against active accounts and categories
//! 4. Insert with the caller as creator
//!
//! Nothing reaches the store unless every step passed.
//!
//! # Voiding
//!
//! Voiding is the only change a movement ever sees. The store's
//! `anular_movimiento` marks it, records reason and timestamp, and from then
//! on excludes it from balances and reports. A failed void is reported as
//! is and never retried.

use uuid::Uuid;

use crate::{
    error::{AppError, ValidationErrors},
    middleware::auth::CallerContext,
    models::{
        category::CategoryType,
        movement::{Movement, MovementDetail, MovementInput, MovementType, NewMovement},
    },
    services::{
        movement_rules::{
            CATEGORY_FIELD, DESTINATION_FIELD, ORIGIN_FIELD, apply_movement_rules,
            validate_void_reason,
        },
        store_failure,
        validation::validate_movement,
    },
    store::LedgerStore,
};

/// Largest page the movement listing returns.
pub const MAX_LIST_LIMIT: i64 = 500;

/// Record a new movement on behalf of the caller.
///
/// # Errors
///
/// - `Validation`: schema errors, type rule violations (missing side,
///   transfer to the same account), or references to inactive/unknown
///   accounts and categories
/// - `StoreFailure`: the store rejected the insert
pub async fn create_movement(
    store: &dyn LedgerStore,
    caller: &CallerContext,
    input: &MovementInput,
) -> Result<Movement, AppError> {
    let draft = validate_movement(input)?;
    let movement = apply_movement_rules(draft)?;
    check_references(store, &movement).await?;

    let created = store
        .insert_movement(&movement, caller.user_id)
        .await
        .map_err(store_failure("Could not create the movement"))?;

    tracing::info!(
        movement_id = %created.id,
        kind = created.kind.as_str(),
        amount = %created.amount,
        "movement recorded"
    );
    Ok(created)
}

/// Void a movement with a mandatory reason.
///
/// # Errors
///
/// - `Validation`: blank reason
/// - `NotFound`: unknown movement
/// - `Conflict`: movement already voided
/// - `Forbidden`: caller is neither the creator nor an admin
/// - `StoreFailure`: the store did not apply the void
pub async fn void_movement(
    store: &dyn LedgerStore,
    caller: &CallerContext,
    id: Uuid,
    reason: Option<&str>,
) -> Result<Movement, AppError> {
    let reason = validate_void_reason(reason)?;

    let movement = store
        .get_movement(id)
        .await?
        .ok_or(AppError::NotFound("Movement"))?;

    if movement.voided {
        return Err(AppError::Conflict("Movement is already voided".to_string()));
    }
    if !caller.can_void(movement.created_by) {
        tracing::warn!(movement_id = %id, user_id = %caller.user_id, "void refused");
        return Err(AppError::Forbidden);
    }

    let applied = store
        .void_movement(id, &reason)
        .await
        .map_err(store_failure("Could not void the movement"))?;
    if !applied {
        tracing::error!(movement_id = %id, "store did not apply the void");
        return Err(AppError::StoreFailure(
            "Could not void the movement".to_string(),
        ));
    }

    tracing::info!(movement_id = %id, user_id = %caller.user_id, "movement voided");

    store
        .get_movement(id)
        .await?
        .ok_or(AppError::NotFound("Movement"))
}

/// Movements with resolved names, newest first.
pub async fn list_movements(
    store: &dyn LedgerStore,
    include_voided: bool,
    limit: i64,
) -> Result<Vec<MovementDetail>, AppError> {
    let limit = limit.clamp(1, MAX_LIST_LIMIT);
    Ok(store.list_movement_details(include_voided, limit).await?)
}

/// Referenced accounts must be active; the category must be active and of
/// the movement's type.
async fn check_references(store: &dyn LedgerStore, movement: &NewMovement) -> Result<(), AppError> {
    let mut errors = ValidationErrors::new("Invalid references");

    for (field, account_id) in [
        (ORIGIN_FIELD, movement.origin_account_id),
        (DESTINATION_FIELD, movement.destination_account_id),
    ] {
        let Some(account_id) = account_id else {
            continue;
        };
        let active = store
            .get_account(account_id)
            .await?
            .is_some_and(|account| account.active);
        if !active {
            errors.add(field, "Account not found or inactive");
        }
    }

    if let Some(category_id) = movement.category_id {
        let expected = match movement.kind {
            MovementType::Income => Some(CategoryType::Income),
            MovementType::Expense => Some(CategoryType::Expense),
            MovementType::Transfer => None,
        };
        let matches = store
            .get_category(category_id)
            .await?
            .is_some_and(|category| category.active && Some(category.kind) == expected);
        if !matches {
            errors.add(
                CATEGORY_FIELD,
                format!(
                    "Category must be an active {} category",
                    movement.kind.as_str()
                ),
            );
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.into())
    }
}
