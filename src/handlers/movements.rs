//! Movement HTTP handlers.
//!
//! - GET /api/v1/movements - Movements with resolved names, newest first
//! - POST /api/v1/movements - Record an income, expense or transfer
//! - POST /api/v1/movements/{id}/void - Void a movement with a reason

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    error::AppError,
    extract::AppJson,
    middleware::auth::CallerContext,
    models::movement::{
        Movement, MovementDetail, MovementInput, MovementListQuery, VoidMovementRequest,
    },
    routes::AppState,
    services::movement_service,
    store::SharedStore,
};

/// Record a movement.
///
/// # Request Body
///
/// ```json
/// {
///   "type": "transfer",
///   "amount": "250000.50",
///   "date": "2024-03-01",
///   "origin_account_id": "550e8400-e29b-41d4-a716-446655440000",
///   "destination_account_id": "660e8400-e29b-41d4-a716-446655440001",
///   "description": "Move to savings"
/// }
/// ```
///
/// Which account and category fields are required depends on `type`:
/// incomes need a destination and a category, expenses an origin and a
/// category, transfers two different accounts and no category.
///
/// # Response
///
/// - **Success (201 Created)**: the stored movement
/// - **Error (422)**: field errors, including inactive references
/// - **Error (502)**: the store rejected the insert
pub async fn create_movement(
    State(store): State<SharedStore>,
    Extension(caller): Extension<CallerContext>,
    AppJson(input): AppJson<MovementInput>,
) -> Result<(StatusCode, Json<Movement>), AppError> {
    let movement = movement_service::create_movement(store.as_ref(), &caller, &input).await?;
    Ok((StatusCode::CREATED, Json(movement)))
}

/// List movements.
///
/// # Query Parameters
///
/// - `limit` (optional): page size, defaults to the configured listing limit
/// - `include_voided` (optional): also return voided movements
pub async fn list_movements(
    State(state): State<AppState>,
    Query(query): Query<MovementListQuery>,
) -> Result<Json<Vec<MovementDetail>>, AppError> {
    let limit = query.limit.unwrap_or(state.movement_list_limit);
    let include_voided = query.include_voided.unwrap_or(false);

    let movements =
        movement_service::list_movements(state.store.as_ref(), include_voided, limit).await?;
    Ok(Json(movements))
}

/// Void a movement.
///
/// # Request Body
///
/// ```json
/// { "reason": "Duplicated entry" }
/// ```
///
/// Only the creator of the movement or an admin may void it. Voiding is
/// permanent; the movement stops counting toward balances and reports.
pub async fn void_movement(
    State(store): State<SharedStore>,
    Extension(caller): Extension<CallerContext>,
    Path(movement_id): Path<Uuid>,
    AppJson(request): AppJson<VoidMovementRequest>,
) -> Result<Json<Movement>, AppError> {
    let movement = movement_service::void_movement(
        store.as_ref(),
        &caller,
        movement_id,
        request.reason.as_deref(),
    )
    .await?;
    Ok(Json(movement))
}
