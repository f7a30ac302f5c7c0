//! Store traits the web services run against.
//!
//! [`crate::Database`] implements them on PostgreSQL. With the `test-util`
//! feature, [`crate::memory::MemoryStore`] implements them in memory.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    AthleteChanges, AthleteRecord, Category, NewAthlete, NewCategory, NewTrainingCenter,
    TrainingCenter,
};

#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Persist a category and return the stored row
    async fn insert_category(&self, category: &NewCategory) -> Result<Category>;

    /// List all categories in insertion order
    async fn list_categories(&self) -> Result<Vec<Category>>;

    async fn find_category_by_id(&self, id: Uuid) -> Result<Option<Category>>;

    /// Exact (case-sensitive) name match
    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>>;

    /// Number of athletes referencing the category
    async fn count_athletes_in_category(&self, pk_id: i32) -> Result<i64>;

    /// Delete by internal key. Fails with `NotFound` when no row was removed.
    async fn delete_category(&self, pk_id: i32) -> Result<()>;
}

#[async_trait]
pub trait TrainingCenterStore: Send + Sync {
    /// Persist a training center and return the stored row
    async fn insert_training_center(&self, center: &NewTrainingCenter) -> Result<TrainingCenter>;

    /// List all training centers in insertion order
    async fn list_training_centers(&self) -> Result<Vec<TrainingCenter>>;

    async fn find_training_center_by_id(&self, id: Uuid) -> Result<Option<TrainingCenter>>;

    /// Exact (case-sensitive) name match
    async fn find_training_center_by_name(&self, name: &str) -> Result<Option<TrainingCenter>>;

    /// Number of athletes referencing the training center
    async fn count_athletes_in_training_center(&self, pk_id: i32) -> Result<i64>;

    /// Delete by internal key. Fails with `NotFound` when no row was removed.
    async fn delete_training_center(&self, pk_id: i32) -> Result<()>;
}

#[async_trait]
pub trait AthleteStore: Send + Sync {
    /// Persist every staged athlete in a single transaction.
    /// Either all rows are committed or none are.
    async fn insert_athletes(&self, athletes: &[NewAthlete]) -> Result<()>;

    /// List all athletes in insertion order
    async fn list_athletes(&self) -> Result<Vec<AthleteRecord>>;

    async fn find_athlete_by_id(&self, id: Uuid) -> Result<Option<AthleteRecord>>;

    async fn find_athlete_by_cpf(&self, cpf: &str) -> Result<Option<AthleteRecord>>;

    /// Apply the present fields of `changes`. Fails with `NotFound` when the
    /// athlete does not exist.
    async fn update_athlete(&self, pk_id: i32, changes: &AthleteChanges) -> Result<()>;

    /// Delete by internal key. Fails with `NotFound` when no row was removed.
    async fn delete_athlete(&self, pk_id: i32) -> Result<()>;
}

/// Everything the API needs from a backing store
pub trait Store: CategoryStore + TrainingCenterStore + AthleteStore {}

impl<T> Store for T where T: CategoryStore + TrainingCenterStore + AthleteStore {}
