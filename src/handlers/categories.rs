//! Category HTTP handlers.
//!
//! - GET /api/v1/categories - Active categories as an income/expense tree
//! - POST /api/v1/categories - Create category (admin)
//! - GET /api/v1/categories/parent-candidates - Eligible parents for a type
//! - GET /api/v1/categories/{id} - Get category by ID
//! - PUT /api/v1/categories/{id} - Update category (admin)
//! - DELETE /api/v1/categories/{id} - Soft delete category (admin)

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
    models::category::{Category, CategoryInput, CategoryTree, CategoryType, ParentCandidatesQuery},
    services::category_service,
    store::SharedStore,
};

/// Create a category.
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Servicios",
///   "type": "expense",
///   "parent_id": "550e8400-e29b-41d4-a716-446655440000"
/// }
/// ```
///
/// `parent_id` must name an active top-level category of the same type.
pub async fn create_category(
    State(store): State<SharedStore>,
    Extension(caller): Extension<CallerContext>,
    AppJson(input): AppJson<CategoryInput>,
) -> Result<(StatusCode, Json<Category>), AppError> {
    let category = category_service::create_category(store.as_ref(), &caller, &input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Active categories grouped by type, children nested under their parent.
pub async fn category_tree(
    State(store): State<SharedStore>,
) -> Result<Json<CategoryTree>, AppError> {
    let tree = category_service::category_tree(store.as_ref()).await?;
    Ok(Json(tree))
}

/// Categories that may be chosen as parent.
///
/// # Query Parameters
///
/// - `type` (required): `income` or `expense`
/// - `exclude` (optional): id of the category being edited
pub async fn list_parent_candidates(
    State(store): State<SharedStore>,
    Query(query): Query<ParentCandidatesQuery>,
) -> Result<Json<Vec<Category>>, AppError> {
    let kind = CategoryType::parse(&query.kind).ok_or_else(|| {
        AppError::InvalidRequest(format!("Unknown category type: {}", query.kind))
    })?;

    let candidates =
        category_service::list_parent_candidates(store.as_ref(), kind, query.exclude).await?;
    Ok(Json(candidates))
}

pub async fn get_category(
    State(store): State<SharedStore>,
    Path(category_id): Path<Uuid>,
) -> Result<Json<Category>, AppError> {
    let category = category_service::get_category(store.as_ref(), category_id).await?;
    Ok(Json(category))
}

pub async fn update_category(
    State(store): State<SharedStore>,
    Extension(caller): Extension<CallerContext>,
    Path(category_id): Path<Uuid>,
    AppJson(input): AppJson<CategoryInput>,
) -> Result<Json<Category>, AppError> {
    let category =
        category_service::update_category(store.as_ref(), &caller, category_id, &input).await?;
    Ok(Json(category))
}

/// Soft delete a category.
///
/// # Response
///
/// - **Success (204 No Content)**
/// - **Error (404)**: unknown category
/// - **Error (409)**: the category still has active sub-categories or
///   non-voided movements
pub async fn delete_category(
    State(store): State<SharedStore>,
    Extension(caller): Extension<CallerContext>,
    Path(category_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    category_service::delete_category(store.as_ref(), &caller, category_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
