//! API key authentication middleware and caller context.
//!
//! This middleware intercepts every protected request to:
//! 1. Extract the API key from the Authorization header
//! 2. Hash it and resolve it to an active profile through the store
//! 3. Inject a [`CallerContext`] into the request
//! 4. Reject unauthorized requests with HTTP 401
//!
//! Issuing keys and managing sessions is not this service's job; keys are
//! provisioned directly in the store.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::{error::AppError, models::profile::Role, store::SharedStore};

/// Identity and role of the caller, passed explicitly to every service
/// operation.
#[derive(Debug, Clone, PartialEq)]
pub struct CallerContext {
    /// Profile id of the caller
    pub user_id: Uuid,

    pub role: Role,

    pub full_name: Option<String>,
}

impl CallerContext {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Fail with [`AppError::Forbidden`] unless the caller is an admin.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            tracing::warn!(user_id = %self.user_id, "admin action refused");
            Err(AppError::Forbidden)
        }
    }

    /// Whether the caller may void a movement created by `creator`.
    pub fn can_void(&self, creator: Uuid) -> bool {
        self.is_admin() || self.user_id == creator
    }
}

/// SHA-256 of an API key, hex encoded (64 characters).
pub fn hash_api_key(api_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(api_key.as_bytes());
    hex::encode(hasher.finalize())
}

/// API key authentication middleware function.
///
/// # Headers
///
/// Expected header format:
/// ```text
/// Authorization: Bearer abc123xyz
/// ```
///
/// # Returns
///
/// - `Ok(Response)` if authenticated successfully (calls next handler)
/// - `Err(AppError::InvalidApiKey)` if authentication fails (returns 401)
pub async fn auth_middleware(
    State(store): State<SharedStore>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let api_key = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(AppError::InvalidApiKey)?;

    let principal = store
        .find_principal(&hash_api_key(api_key))
        .await?
        .ok_or(AppError::InvalidApiKey)?;

    tracing::debug!(user_id = %principal.id, email = %principal.email, "request authenticated");

    // Route handlers extract this with Extension<CallerContext>
    request.extensions_mut().insert(CallerContext {
        user_id: principal.id,
        role: principal.role,
        full_name: principal.full_name,
    });

    Ok(next.run(request).await)
}
