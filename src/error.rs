//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Field-keyed validation errors.
///
/// Produced by the validation layer and the movement rules engine. Each field
/// maps to one or more human-readable messages; `message` summarizes the
/// failure for display above the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    pub message: String,
    pub fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Shorthand for a single error on a single field.
    pub fn single(
        message: impl Into<String>,
        field: &str,
        error: impl Into<String>,
    ) -> Self {
        let mut errors = Self::new(message);
        errors.add(field, error);
        errors
    }

    pub fn add(&mut self, field: &str, error: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(error.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[cfg(test)]
    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Messages recorded for `field`, empty if none.
    #[cfg(test)]
    pub fn get(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Application-wide error type.
///
/// # Error Categories
///
/// - **Validation Errors**: field-keyed, recoverable, re-displayed to the user
/// - **Store Failures**: a write or void the store refused; not applied, not retried
/// - **Authorization Errors**: missing credential or insufficient role
/// - **Resource Errors**: requested resources not found, or in a state that forbids the change
/// - **Database Errors**: unexpected failures while reading
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Unexpected database failure (connection error, query error).
    ///
    /// Returns HTTP 500 Internal Server Error without details.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Input failed schema validation or a business rule.
    ///
    /// Returns HTTP 422 Unprocessable Entity with the field map.
    #[error("{}", .0.message)]
    Validation(ValidationErrors),

    /// The store rejected an insert, update or void.
    ///
    /// Returns HTTP 502 Bad Gateway. The operation is considered not applied.
    #[error("{0}")]
    StoreFailure(String),

    /// API key is missing, invalid, or inactive.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Invalid API key")]
    InvalidApiKey,

    /// Caller lacks the role required for the action.
    ///
    /// Returns HTTP 403 Forbidden.
    #[error("Not allowed to perform this action")]
    Forbidden,

    /// Requested resource does not exist.
    ///
    /// Returns HTTP 404 Not Found. The str names the resource.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The resource is in a state that forbids the change.
    ///
    /// Returns HTTP 409 Conflict.
    #[error("{0}")]
    Conflict(String),

    /// Request parameters are malformed.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("Invalid request")]
    InvalidRequest(String),
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

/// Field key for body errors that cannot be tied to a single field.
const BODY_FIELD: &str = "body";

/// A well-formed JSON body whose values do not fit the request type becomes
/// a field error; anything else (syntax, content type) is a bad request.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => {
                let text = err.body_text();
                let (field, message) = field_error(&text);
                AppError::Validation(ValidationErrors::single("Invalid fields", field, message))
            }
            other => AppError::InvalidRequest(other.body_text()),
        }
    }
}

/// Split axum's "...target type: <path>: <error>" text into field and
/// message. Errors on the body as a whole have no path.
fn field_error(text: &str) -> (&str, &str) {
    let detail = text
        .split_once("target type: ")
        .map_or(text, |(_, detail)| detail);

    detail
        .split_once(": ")
        .filter(|(path, _)| !path.is_empty() && !path.contains(' '))
        .unwrap_or((BODY_FIELD, detail))
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// ```json
/// {
///   "error": {
///     "code": "validation_failed",
///     "message": "Invalid fields",
///     "fields": { "amount": ["Amount must be at least 1"] }
///   }
/// }
/// ```
///
/// `fields` is only present for validation errors.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map each error variant to (HTTP status, error code, message, field errors)
        let (status, code, message, fields) = match self {
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_failed",
                errors.message,
                Some(errors.fields),
            ),
            AppError::InvalidApiKey => (
                StatusCode::UNAUTHORIZED,
                "invalid_api_key",
                self.to_string(),
                None,
            ),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "forbidden", self.to_string(), None),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found", self.to_string(), None),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            AppError::StoreFailure(msg) => (StatusCode::BAD_GATEWAY, "store_failure", msg, None),
            AppError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg, None)
            }
            AppError::Database(err) => {
                tracing::error!(error = %err, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(fields) = fields {
            error["fields"] = json!(fields);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}
