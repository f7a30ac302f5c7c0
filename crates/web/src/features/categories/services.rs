use storage::{
    CategoryStore,
    dto::category::{CategoryResponse, CreateCategoryRequest},
    models::NewCategory,
};
use uuid::Uuid;

use crate::error::{WebError, WebResult};

/// Create a category, rejecting names that are already taken
pub async fn create_category<S>(store: &S, request: &CreateCategoryRequest) -> WebResult<CategoryResponse>
where
    S: CategoryStore + ?Sized,
{
    let name = request.nome.trim();

    if store.find_category_by_name(name).await?.is_some() {
        tracing::warn!(name, "Rejected duplicate category");
        return Err(WebError::Conflict(format!(
            "A category named '{name}' already exists."
        )));
    }

    let category = store
        .insert_category(&NewCategory {
            id: Uuid::new_v4(),
            name: name.to_string(),
        })
        .await
        .map_err(|e| WebError::from_write(e, "create the category"))?;

    tracing::info!(category_id = %category.id, "Category created");
    Ok(CategoryResponse::from(category))
}

/// List all categories
pub async fn list_categories<S>(store: &S) -> WebResult<Vec<CategoryResponse>>
where
    S: CategoryStore + ?Sized,
{
    let categories = store.list_categories().await?;
    Ok(categories.into_iter().map(CategoryResponse::from).collect())
}

/// Get category by external id
pub async fn get_category<S>(store: &S, id: Uuid) -> WebResult<CategoryResponse>
where
    S: CategoryStore + ?Sized,
{
    store
        .find_category_by_id(id)
        .await?
        .map(CategoryResponse::from)
        .ok_or_else(|| not_found(id))
}

/// Delete a category that no athlete references
pub async fn delete_category<S>(store: &S, id: Uuid) -> WebResult<()>
where
    S: CategoryStore + ?Sized,
{
    let category = store
        .find_category_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let linked_athletes = store.count_athletes_in_category(category.pk_id).await?;
    if linked_athletes > 0 {
        tracing::warn!(category_id = %id, linked_athletes, "Refused to delete category in use");
        return Err(WebError::InUse {
            message: format!(
                "Cannot delete category '{}': {} athlete(s) are currently linked to it. \
                 Move the athlete(s) to another category before deleting it.",
                category.name, linked_athletes
            ),
            linked_athletes,
        });
    }

    store
        .delete_category(category.pk_id)
        .await
        .map_err(|e| WebError::from_write(e, "delete the category"))?;

    tracing::info!(category_id = %id, "Category deleted");
    Ok(())
}

fn not_found(id: Uuid) -> WebError {
    WebError::NotFound(format!("Category not found: {id}"))
}
