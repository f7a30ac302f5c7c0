use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::common::validate_not_blank;
use crate::models::TrainingCenter;

/// Request payload for creating a new training center
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateTrainingCenterRequest {
    #[validate(
        length(max = 50, message = "Name must be at most 50 characters"),
        custom(function = "validate_not_blank")
    )]
    #[schema(example = "CT King")]
    pub nome: String,

    #[validate(length(
        min = 1,
        max = 60,
        message = "Address must be between 1 and 60 characters"
    ))]
    #[schema(example = "Rua X, Q02")]
    pub endereco: String,

    #[validate(length(
        min = 1,
        max = 30,
        message = "Owner must be between 1 and 30 characters"
    ))]
    #[schema(example = "Marcos")]
    pub proprietario: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TrainingCenterResponse {
    pub id: Uuid,
    pub nome: String,
    pub endereco: String,
    pub proprietario: String,
}

impl From<TrainingCenter> for TrainingCenterResponse {
    fn from(center: TrainingCenter) -> Self {
        Self {
            id: center.id,
            nome: center.name,
            endereco: center.address,
            proprietario: center.owner,
        }
    }
}
