//! Liveness check: `GET /health`, no API key needed.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{error::AppError, store::SharedStore};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub store: &'static str,
    pub checked_at: DateTime<Utc>,
}

/// Report the service healthy once the store answers a trivial query.
///
/// ```json
/// { "status": "healthy", "store": "reachable", "checked_at": "2025-12-21T19:00:00Z" }
/// ```
///
/// An unreachable store surfaces as the usual 500 error body.
pub async fn health_check(
    State(store): State<SharedStore>,
) -> Result<Json<HealthResponse>, AppError> {
    store.ping().await?;

    Ok(Json(HealthResponse {
        status: "healthy",
        store: "reachable",
        checked_at: Utc::now(),
    }))
}
