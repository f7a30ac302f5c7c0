use axum::{Router, routing::get};

use super::handlers::{
    create_training_center, delete_training_center, get_training_center, list_training_centers,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/training-centers",
            get(list_training_centers).post(create_training_center),
        )
        .route(
            "/training-centers/",
            get(list_training_centers).post(create_training_center),
        )
        .route(
            "/training-centers/:id",
            get(get_training_center).delete(delete_training_center),
        )
}
