//! HTTP request handlers (route handlers).
//!
//! Handlers only extract request data and hand it to the service layer
//! together with the [`CallerContext`](crate::middleware::auth::CallerContext)
//! the auth middleware attached. Rules and validation live in
//! [`services`](crate::services).

/// Account management endpoints
pub mod accounts;

/// Category management and hierarchy endpoints
pub mod categories;

pub mod dashboard;

/// Health check endpoint
pub mod health;

/// Movement recording, listing and voiding endpoints
pub mod movements;
