//! Category service - creation, update and soft deletion of categories.
//!
//! Nesting is limited to one level. The schema does not stop a deeper tree,
//! so a chosen parent is checked here against the same candidate rule the
//! forms use.

use uuid::Uuid;

use crate::{
    error::{AppError, ValidationErrors},
    middleware::auth::CallerContext,
    models::category::{Category, CategoryInput, CategoryTree, CategoryType, NewCategory},
    services::{
        category_tree::{build_tree, children_of, parent_candidates},
        store_failure,
        validation::{INVALID_FIELDS, validate_category},
    },
    store::LedgerStore,
};

/// Create an active category.
///
/// # Errors
///
/// - `Forbidden`: caller is not an admin
/// - `Validation`: bad name/type/parent, or a parent that is not an eligible candidate
/// - `StoreFailure`: the store rejected the insert
pub async fn create_category(
    store: &dyn LedgerStore,
    caller: &CallerContext,
    input: &CategoryInput,
) -> Result<Category, AppError> {
    caller.require_admin()?;
    let category = validate_category(input)?;
    check_hierarchy(store, None, &category).await?;

    let created = store
        .insert_category(&category, caller.user_id)
        .await
        .map_err(store_failure("Could not create the category"))?;

    tracing::info!(category_id = %created.id, kind = created.kind.as_str(), "category created");
    Ok(created)
}

pub async fn update_category(
    store: &dyn LedgerStore,
    caller: &CallerContext,
    id: Uuid,
    input: &CategoryInput,
) -> Result<Category, AppError> {
    caller.require_admin()?;
    let category = validate_category(input)?;
    check_hierarchy(store, Some(id), &category).await?;

    store
        .update_category(id, &category)
        .await
        .map_err(store_failure("Could not update the category"))?
        .ok_or(AppError::NotFound("Category"))
}

/// Soft delete a category that no active movement uses.
///
/// # Errors
///
/// - `NotFound`: unknown category
/// - `Conflict`: the category still has active sub-categories, or
///   non-voided movements still reference it
pub async fn delete_category(
    store: &dyn LedgerStore,
    caller: &CallerContext,
    id: Uuid,
) -> Result<(), AppError> {
    caller.require_admin()?;

    store
        .get_category(id)
        .await?
        .ok_or(AppError::NotFound("Category"))?;

    let active = store.list_categories(false).await?;
    if !children_of(&active, id).is_empty() {
        return Err(AppError::Conflict(
            "Cannot delete: the category has sub-categories".to_string(),
        ));
    }

    let in_use = store.count_active_movements_in_category(id).await?;
    if in_use > 0 {
        return Err(AppError::Conflict(
            "Cannot delete: the category has movements".to_string(),
        ));
    }

    let deleted = store
        .deactivate_category(id)
        .await
        .map_err(store_failure("Could not delete the category"))?;
    if !deleted {
        return Err(AppError::NotFound("Category"));
    }

    tracing::info!(category_id = %id, "category deactivated");
    Ok(())
}

pub async fn get_category(store: &dyn LedgerStore, id: Uuid) -> Result<Category, AppError> {
    store
        .get_category(id)
        .await?
        .ok_or(AppError::NotFound("Category"))
}

/// Active categories grouped by type, one level deep.
pub async fn category_tree(store: &dyn LedgerStore) -> Result<CategoryTree, AppError> {
    let categories = store.list_categories(false).await?;
    Ok(build_tree(&categories))
}

/// Active categories a category of type `kind` may pick as parent.
pub async fn list_parent_candidates(
    store: &dyn LedgerStore,
    kind: CategoryType,
    exclude: Option<Uuid>,
) -> Result<Vec<Category>, AppError> {
    let categories = store.list_categories(false).await?;
    Ok(parent_candidates(&categories, kind, exclude)
        .into_iter()
        .cloned()
        .collect())
}

/// Keep the tree at depth one and children of the same type as their parent.
async fn check_hierarchy(
    store: &dyn LedgerStore,
    editing: Option<Uuid>,
    category: &NewCategory,
) -> Result<(), AppError> {
    let categories = store.list_categories(false).await?;
    let mut errors = ValidationErrors::new(INVALID_FIELDS);

    let children = editing
        .map(|id| children_of(&categories, id))
        .unwrap_or_default();

    if let Some(parent_id) = category.parent_id {
        let eligible = parent_candidates(&categories, category.kind, editing)
            .iter()
            .any(|candidate| candidate.id == parent_id);
        if !eligible {
            errors.add(
                "parent_id",
                "Parent must be an active top-level category of the same type",
            );
        } else if !children.is_empty() {
            errors.add(
                "parent_id",
                "A category with sub-categories cannot have a parent",
            );
        }
    }

    if children.iter().any(|child| child.kind != category.kind) {
        errors.add(
            "type",
            "Cannot change the type of a category with sub-categories",
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.into())
    }
}
