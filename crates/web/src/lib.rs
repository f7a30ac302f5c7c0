pub mod config;
pub mod error;
pub mod extract;
pub mod features;
pub mod response;
pub mod state;

use axum::{Router, response::Redirect, routing::get};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use features::{athletes, categories, training_centers};
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(title = "Workout API", description = "Athletes, categories and training centers"),
    paths(
        categories::handlers::create_category,
        categories::handlers::list_categories,
        categories::handlers::get_category,
        categories::handlers::delete_category,
        training_centers::handlers::create_training_center,
        training_centers::handlers::list_training_centers,
        training_centers::handlers::get_training_center,
        training_centers::handlers::delete_training_center,
        athletes::handlers::create_athletes,
        athletes::handlers::list_athletes,
        athletes::handlers::get_athlete,
        athletes::handlers::update_athlete,
        athletes::handlers::delete_athlete,
    ),
    components(
        schemas(
            storage::dto::category::CreateCategoryRequest,
            storage::dto::category::CategoryResponse,
            storage::dto::training_center::CreateTrainingCenterRequest,
            storage::dto::training_center::TrainingCenterResponse,
            storage::dto::athlete::CreateAthleteRequest,
            storage::dto::athlete::UpdateAthleteRequest,
            storage::dto::athlete::AthleteResponse,
            storage::dto::athlete::NamedReference,
            storage::dto::athlete::NamedReferenceUpdate,
            response::ApiErrorBody,
            error::FieldError,
        )
    ),
    tags(
        (name = "categories", description = "Athlete categories"),
        (name = "training-centers", description = "Training centers"),
        (name = "athletes", description = "Athletes and their category/training center"),
    )
)]
pub struct ApiDoc;

/// Assemble the full application router around `state`
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::temporary("/docs") }))
        .merge(categories::routes::routes())
        .merge(training_centers::routes::routes())
        .merge(athletes::routes::routes())
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
