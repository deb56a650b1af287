//! One-level category hierarchy.

use uuid::Uuid;

use crate::models::category::{Category, CategoryNode, CategoryTree, CategoryType};

/// Group categories into top-level entries per type, each with its direct
/// children.
///
/// Input order is preserved within each group. Children whose parent is not
/// among `categories` (inactive or missing parent) are not listed, and a
/// grandchild is never attached anywhere.
pub fn build_tree(categories: &[Category]) -> CategoryTree {
    let mut tree = CategoryTree::default();

    for category in categories.iter().filter(|c| c.parent_id.is_none()) {
        let node = CategoryNode {
            category: category.clone(),
            children: children_of(categories, category.id),
        };
        match category.kind {
            CategoryType::Income => tree.income.push(node),
            CategoryType::Expense => tree.expense.push(node),
        }
    }

    tree
}

/// Direct children of `parent_id`.
pub fn children_of(categories: &[Category], parent_id: Uuid) -> Vec<Category> {
    categories
        .iter()
        .filter(|c| c.parent_id == Some(parent_id))
        .cloned()
        .collect()
}

/// Categories eligible as parent of a category of type `kind`.
///
/// A candidate has the same type, is not the category being edited, and
/// has no parent itself, which keeps nesting at depth one.
pub fn parent_candidates<'a>(
    categories: &'a [Category],
    kind: CategoryType,
    editing: Option<Uuid>,
) -> Vec<&'a Category> {
    categories
        .iter()
        .filter(|c| c.kind == kind && Some(c.id) != editing && c.parent_id.is_none())
        .collect()
}
