//! HTTP middleware components.
//!
//! Middleware are functions that run before route handlers. Here they
//! resolve the caller and short-circuit unauthenticated requests.

/// API key authentication middleware
pub mod auth;
