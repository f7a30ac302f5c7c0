use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::dto::category::{CategoryResponse, CreateCategoryRequest};

use crate::{
    error::WebError,
    extract::{EntityId, ValidatedJson},
    response::{ApiResponse, success},
    state::AppState,
};

use super::services;

#[utoipa::path(
    post,
    path = "/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created successfully", body = ApiResponse<CategoryResponse>),
        (status = 409, description = "A category with this name already exists"),
        (status = 422, description = "Validation error")
    ),
    tag = "categories"
)]
pub async fn create_category(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateCategoryRequest>,
) -> Result<Response, WebError> {
    let category = services::create_category(state.store.as_ref(), &req).await?;

    Ok(success(StatusCode::CREATED, category))
}

#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "List all categories successfully", body = ApiResponse<Vec<CategoryResponse>>)
    ),
    tag = "categories"
)]
pub async fn list_categories(State(state): State<AppState>) -> Result<Response, WebError> {
    let categories = services::list_categories(state.store.as_ref()).await?;

    Ok(success(StatusCode::OK, categories))
}

#[utoipa::path(
    get,
    path = "/categories/{id}",
    params(
        ("id" = uuid::Uuid, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryResponse>),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Response, WebError> {
    let category = services::get_category(state.store.as_ref(), id).await?;

    Ok(success(StatusCode::OK, category))
}

#[utoipa::path(
    delete,
    path = "/categories/{id}",
    params(
        ("id" = uuid::Uuid, Path, description = "Category id")
    ),
    responses(
        (status = 204, description = "Category deleted successfully"),
        (status = 400, description = "Athletes are still linked to the category"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Response, WebError> {
    services::delete_category(state.store.as_ref(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
