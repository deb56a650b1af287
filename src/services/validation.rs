//! Schema validation for account, category and movement input.
//!
//! Every validator is a pure function: it never touches the store and never
//! panics on bad input. All field errors are collected before returning so a
//! form can show every problem at once.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    error::ValidationErrors,
    models::{
        account::{AccountInput, AccountType, NewAccount},
        category::{CategoryInput, CategoryType, NewCategory},
        movement::{MovementDraft, MovementInput, MovementType},
    },
};

/// Summary message attached to schema failures.
pub const INVALID_FIELDS: &str = "Invalid fields";

pub const NAME_MIN_CHARS: usize = 3;

/// Smallest accepted movement amount.
pub const MIN_AMOUNT: Decimal = Decimal::ONE;

/// Upper bound (exclusive) imposed by the `NUMERIC(14, 2)` column.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

const AMOUNT_MAX_SCALE: u32 = 2;

/// Validate account input.
pub fn validate_account(input: &AccountInput) -> Result<NewAccount, ValidationErrors> {
    let mut errors = ValidationErrors::new(INVALID_FIELDS);

    let name = validate_name(input.name.as_deref(), &mut errors);
    let kind = match optional_text(input.kind.as_deref()) {
        None => {
            errors.add("type", "Type is required");
            None
        }
        Some(value) => {
            let kind = AccountType::parse(&value);
            if kind.is_none() {
                errors.add(
                    "type",
                    "Invalid type: expected one of cash, bank, card, wallet",
                );
            }
            kind
        }
    };
    let description = optional_text(input.description.as_deref());

    match (name, kind) {
        (Some(name), Some(kind)) if errors.is_empty() => Ok(NewAccount {
            name,
            kind,
            description,
        }),
        _ => Err(errors),
    }
}

/// Validate category input.
///
/// Only the shape of `parent_id` is checked here. Whether the parent is an
/// eligible candidate depends on the stored categories and is decided by the
/// category service.
pub fn validate_category(input: &CategoryInput) -> Result<NewCategory, ValidationErrors> {
    let mut errors = ValidationErrors::new(INVALID_FIELDS);

    let name = validate_name(input.name.as_deref(), &mut errors);
    let kind = match optional_text(input.kind.as_deref()) {
        None => {
            errors.add("type", "Type is required");
            None
        }
        Some(value) => {
            let kind = CategoryType::parse(&value);
            if kind.is_none() {
                errors.add("type", "Invalid type: expected income or expense");
            }
            kind
        }
    };
    let parent_id = optional_uuid("parent_id", input.parent_id.as_deref(), &mut errors);
    let description = optional_text(input.description.as_deref());

    match (name, kind) {
        (Some(name), Some(kind)) if errors.is_empty() => Ok(NewCategory {
            name,
            kind,
            parent_id,
            description,
        }),
        _ => Err(errors),
    }
}

/// Validate movement input.
///
/// Account and category references are only checked for shape; the movement
/// rules engine decides which of them a given type requires.
pub fn validate_movement(input: &MovementInput) -> Result<MovementDraft, ValidationErrors> {
    let mut errors = ValidationErrors::new(INVALID_FIELDS);

    let kind = match optional_text(input.kind.as_deref()) {
        None => {
            errors.add("type", "Type is required");
            None
        }
        Some(value) => {
            let kind = MovementType::parse(&value);
            if kind.is_none() {
                errors.add("type", "Invalid type: expected income, expense or transfer");
            }
            kind
        }
    };

    let amount = match parse_amount(input.amount.as_ref()) {
        Ok(amount) => Some(amount),
        Err(message) => {
            errors.add("amount", message);
            None
        }
    };

    let date = match parse_date(input.date.as_deref()) {
        Ok(date) => Some(date),
        Err(message) => {
            errors.add("date", message);
            None
        }
    };

    let description = optional_text(input.description.as_deref());
    let origin_account_id = optional_uuid(
        "origin_account_id",
        input.origin_account_id.as_deref(),
        &mut errors,
    );
    let destination_account_id = optional_uuid(
        "destination_account_id",
        input.destination_account_id.as_deref(),
        &mut errors,
    );
    let category_id = optional_uuid("category_id", input.category_id.as_deref(), &mut errors);

    match (kind, amount, date) {
        (Some(kind), Some(amount), Some(date)) if errors.is_empty() => Ok(MovementDraft {
            kind,
            amount,
            date,
            description,
            origin_account_id,
            destination_account_id,
            category_id,
        }),
        _ => Err(errors),
    }
}

fn validate_name(value: Option<&str>, errors: &mut ValidationErrors) -> Option<String> {
    match optional_text(value) {
        None => {
            errors.add("name", "Name is required");
            None
        }
        Some(name) if name.chars().count() < NAME_MIN_CHARS => {
            errors.add("name", "Name must be at least 3 characters");
            None
        }
        Some(name) => Some(name),
    }
}

/// Trimmed text, with blank treated as absent.
fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

fn optional_uuid(field: &str, value: Option<&str>, errors: &mut ValidationErrors) -> Option<Uuid> {
    let text = optional_text(value)?;
    match Uuid::parse_str(&text) {
        Ok(id) => Some(id),
        Err(_) => {
            errors.add(field, "Invalid identifier");
            None
        }
    }
}

/// Parse a movement amount from a JSON number or numeric string.
///
/// The textual form is parsed straight into a `Decimal` so values such as
/// `0.1` never pick up binary floating-point error.
fn parse_amount(value: Option<&serde_json::Value>) -> Result<Decimal, &'static str> {
    let text = match value {
        None | Some(serde_json::Value::Null) => return Err("Amount is required"),
        Some(serde_json::Value::Number(number)) => number.to_string(),
        Some(serde_json::Value::String(text)) => text.trim().to_string(),
        Some(_) => return Err("Amount must be a number"),
    };
    if text.is_empty() {
        return Err("Amount is required");
    }
    // Decimal's parser also takes digit separators and an explicit plus sign
    if text.starts_with('+') || text.contains('_') {
        return Err("Amount must be a number");
    }

    let amount = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| "Amount must be a number")?;

    if amount < MIN_AMOUNT {
        return Err("Amount must be at least 1");
    }
    if amount >= MAX_AMOUNT {
        return Err("Amount is too large");
    }
    if amount.normalize().scale() > AMOUNT_MAX_SCALE {
        return Err("Amount can have at most 2 decimal places");
    }
    Ok(amount)
}

/// Parse the calendar day at the start of a caller-supplied date string.
///
/// Accepts `YYYY-MM-DD` optionally followed by a time part (`T...` or
/// ` ...`). The day is taken from the text itself, never shifted by a
/// timezone.
fn parse_date(value: Option<&str>) -> Result<NaiveDate, &'static str> {
    let text = value.map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err("Date is required");
    }

    let invalid = "Date must start with YYYY-MM-DD";
    let day = text.get(..10).ok_or(invalid)?;
    let rest = &text[10..];
    if !(rest.is_empty() || rest.starts_with('T') || rest.starts_with(' ')) {
        return Err(invalid);
    }
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|_| invalid)
}
