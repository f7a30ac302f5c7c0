use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::dto::{
    athlete::{AthleteResponse, CreateAthleteRequest, UpdateAthleteRequest},
    common::OneOrMany,
};

use crate::{
    error::WebError,
    extract::{EntityId, ValidatedBatch, ValidatedJson},
    response::{ApiResponse, success},
    state::AppState,
};

use super::services;

#[utoipa::path(
    post,
    path = "/athletes",
    request_body = OneOrMany<CreateAthleteRequest>,
    responses(
        (status = 201, description = "Athlete(s) created; a list in yields a list out", body = ApiResponse<OneOrMany<AthleteResponse>>),
        (status = 400, description = "Referenced category or training center not found"),
        (status = 409, description = "An athlete with this CPF already exists"),
        (status = 422, description = "Validation error"),
        (status = 500, description = "The athletes could not be stored")
    ),
    tag = "athletes"
)]
pub async fn create_athletes(
    State(state): State<AppState>,
    ValidatedBatch(payload): ValidatedBatch<CreateAthleteRequest>,
) -> Result<Response, WebError> {
    let created = services::create_athletes(state.store.as_ref(), payload).await?;

    Ok(success(StatusCode::CREATED, created))
}

#[utoipa::path(
    get,
    path = "/athletes",
    responses(
        (status = 200, description = "List all athletes successfully", body = ApiResponse<Vec<AthleteResponse>>)
    ),
    tag = "athletes"
)]
pub async fn list_athletes(State(state): State<AppState>) -> Result<Response, WebError> {
    let athletes = services::list_athletes(state.store.as_ref()).await?;

    Ok(success(StatusCode::OK, athletes))
}

#[utoipa::path(
    get,
    path = "/athletes/{id}",
    params(
        ("id" = uuid::Uuid, Path, description = "Athlete id")
    ),
    responses(
        (status = 200, description = "Athlete found", body = ApiResponse<AthleteResponse>),
        (status = 404, description = "Athlete not found")
    ),
    tag = "athletes"
)]
pub async fn get_athlete(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Response, WebError> {
    let athlete = services::get_athlete(state.store.as_ref(), id).await?;

    Ok(success(StatusCode::OK, athlete))
}

#[utoipa::path(
    patch,
    path = "/athletes/{id}",
    params(
        ("id" = uuid::Uuid, Path, description = "Athlete id")
    ),
    request_body = UpdateAthleteRequest,
    responses(
        (status = 200, description = "Athlete updated successfully", body = ApiResponse<AthleteResponse>),
        (status = 400, description = "Referenced category or training center not found"),
        (status = 404, description = "Athlete not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "athletes"
)]
pub async fn update_athlete(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    ValidatedJson(update_req): ValidatedJson<UpdateAthleteRequest>,
) -> Result<Response, WebError> {
    let updated = services::update_athlete(state.store.as_ref(), id, &update_req).await?;

    Ok(success(StatusCode::OK, updated))
}

#[utoipa::path(
    delete,
    path = "/athletes/{id}",
    params(
        ("id" = uuid::Uuid, Path, description = "Athlete id")
    ),
    responses(
        (status = 204, description = "Athlete deleted successfully"),
        (status = 404, description = "Athlete not found")
    ),
    tag = "athletes"
)]
pub async fn delete_athlete(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Response, WebError> {
    services::delete_athlete(state.store.as_ref(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
