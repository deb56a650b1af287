//! Semantic rules of movements.
//!
//! Which accounts and whether a category a movement needs depends on its
//! type:
//!
//! | type     | origin   | destination | category |
//! |----------|----------|-------------|----------|
//! | income   | absent   | required    | required |
//! | expense  | required | absent      | required |
//! | transfer | required | required, ≠ origin | absent |
//!
//! Accepting a draft also normalizes it: references forbidden for its type
//! are dropped before the movement reaches the store.

use crate::{
    error::ValidationErrors,
    models::movement::{MovementDraft, MovementType, NewMovement},
};

pub const ORIGIN_FIELD: &str = "origin_account_id";
pub const DESTINATION_FIELD: &str = "destination_account_id";
pub const CATEGORY_FIELD: &str = "category_id";

/// Decide whether a schema-valid draft is acceptable and normalize it.
///
/// # Errors
///
/// Returns field errors naming the missing account side, the missing
/// category, or the destination when a transfer points back at its origin.
pub fn apply_movement_rules(draft: MovementDraft) -> Result<NewMovement, ValidationErrors> {
    let MovementDraft {
        kind,
        amount,
        date,
        description,
        origin_account_id,
        destination_account_id,
        category_id,
    } = draft;

    let (origin, destination, category) = match kind {
        MovementType::Income => {
            let mut errors = ValidationErrors::new("Missing destination account");
            if destination_account_id.is_none() {
                errors.add(DESTINATION_FIELD, "Required for income");
            }
            if category_id.is_none() {
                errors.add(CATEGORY_FIELD, "Required for income");
            }
            if !errors.is_empty() {
                if destination_account_id.is_some() {
                    errors.message = "Missing category".to_string();
                }
                return Err(errors);
            }
            (None, destination_account_id, category_id)
        }
        MovementType::Expense => {
            let mut errors = ValidationErrors::new("Missing origin account");
            if origin_account_id.is_none() {
                errors.add(ORIGIN_FIELD, "Required for expenses");
            }
            if category_id.is_none() {
                errors.add(CATEGORY_FIELD, "Required for expenses");
            }
            if !errors.is_empty() {
                if origin_account_id.is_some() {
                    errors.message = "Missing category".to_string();
                }
                return Err(errors);
            }
            (origin_account_id, None, category_id)
        }
        MovementType::Transfer => {
            let mut errors = ValidationErrors::new("Both accounts are required for a transfer");
            if origin_account_id.is_none() {
                errors.add(ORIGIN_FIELD, "Required for transfers");
            }
            if destination_account_id.is_none() {
                errors.add(DESTINATION_FIELD, "Required for transfers");
            }
            if !errors.is_empty() {
                return Err(errors);
            }
            if origin_account_id == destination_account_id {
                return Err(ValidationErrors::single(
                    "Origin and destination are the same account",
                    DESTINATION_FIELD,
                    "Destination must differ from origin",
                ));
            }
            (origin_account_id, destination_account_id, None)
        }
    };

    Ok(NewMovement {
        kind,
        amount,
        date,
        description,
        origin_account_id: origin,
        destination_account_id: destination,
        category_id: category,
    })
}

/// Validate the reason given for voiding a movement.
///
/// The reason is mandatory and stored trimmed.
pub fn validate_void_reason(reason: Option<&str>) -> Result<String, ValidationErrors> {
    match reason.map(str::trim).filter(|text| !text.is_empty()) {
        Some(reason) => Ok(reason.to_string()),
        None => Err(ValidationErrors::single(
            "A reason is required to void a movement",
            "reason",
            "Reason is required",
        )),
    }
}
