use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::dto::training_center::{CreateTrainingCenterRequest, TrainingCenterResponse};

use crate::{
    error::WebError,
    extract::{EntityId, ValidatedJson},
    response::{ApiResponse, success},
    state::AppState,
};

use super::services;

#[utoipa::path(
    post,
    path = "/training-centers",
    request_body = CreateTrainingCenterRequest,
    responses(
        (status = 201, description = "Training center created successfully", body = ApiResponse<TrainingCenterResponse>),
        (status = 409, description = "A training center with this name already exists"),
        (status = 422, description = "Validation error")
    ),
    tag = "training-centers"
)]
pub async fn create_training_center(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateTrainingCenterRequest>,
) -> Result<Response, WebError> {
    let center = services::create_training_center(state.store.as_ref(), &req).await?;

    Ok(success(StatusCode::CREATED, center))
}

#[utoipa::path(
    get,
    path = "/training-centers",
    responses(
        (status = 200, description = "List all training centers", body = ApiResponse<Vec<TrainingCenterResponse>>)
    ),
    tag = "training-centers"
)]
pub async fn list_training_centers(State(state): State<AppState>) -> Result<Response, WebError> {
    let centers = services::list_training_centers(state.store.as_ref()).await?;

    Ok(success(StatusCode::OK, centers))
}

#[utoipa::path(
    get,
    path = "/training-centers/{id}",
    params(
        ("id" = uuid::Uuid, Path, description = "Training center id")
    ),
    responses(
        (status = 200, description = "Training center found", body = ApiResponse<TrainingCenterResponse>),
        (status = 404, description = "Training center not found")
    ),
    tag = "training-centers"
)]
pub async fn get_training_center(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Response, WebError> {
    let center = services::get_training_center(state.store.as_ref(), id).await?;

    Ok(success(StatusCode::OK, center))
}

#[utoipa::path(
    delete,
    path = "/training-centers/{id}",
    params(
        ("id" = uuid::Uuid, Path, description = "Training center id")
    ),
    responses(
        (status = 204, description = "Training center deleted successfully"),
        (status = 400, description = "Athletes are still linked to the training center"),
        (status = 404, description = "Training center not found")
    ),
    tag = "training-centers"
)]
pub async fn delete_training_center(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Response, WebError> {
    services::delete_training_center(state.store.as_ref(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
