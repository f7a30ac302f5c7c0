use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct TrainingCenter {
    pub pk_id: i32,
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub owner: String,
}

/// A training center staged for insertion
#[derive(Debug, Clone)]
pub struct NewTrainingCenter {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub owner: String,
}
