use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    AthleteChanges, AthleteRecord, Category, NewAthlete, NewCategory, NewTrainingCenter,
    TrainingCenter,
};
use crate::repository::{
    athlete::AthleteRepository, category::CategoryRepository,
    training_center::TrainingCenterRepository,
};
use crate::store::{AthleteStore, CategoryStore, TrainingCenterStore};

/// PostgreSQL-backed store
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl CategoryStore for Database {
    async fn insert_category(&self, category: &NewCategory) -> Result<Category> {
        CategoryRepository::new(&self.pool).create(category).await
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        CategoryRepository::new(&self.pool).list().await
    }

    async fn find_category_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        CategoryRepository::new(&self.pool).find_by_id(id).await
    }

    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>> {
        CategoryRepository::new(&self.pool).find_by_name(name).await
    }

    async fn count_athletes_in_category(&self, pk_id: i32) -> Result<i64> {
        CategoryRepository::new(&self.pool).count_athletes(pk_id).await
    }

    async fn delete_category(&self, pk_id: i32) -> Result<()> {
        CategoryRepository::new(&self.pool).delete(pk_id).await
    }
}

#[async_trait]
impl TrainingCenterStore for Database {
    async fn insert_training_center(&self, center: &NewTrainingCenter) -> Result<TrainingCenter> {
        TrainingCenterRepository::new(&self.pool).create(center).await
    }

    async fn list_training_centers(&self) -> Result<Vec<TrainingCenter>> {
        TrainingCenterRepository::new(&self.pool).list().await
    }

    async fn find_training_center_by_id(&self, id: Uuid) -> Result<Option<TrainingCenter>> {
        TrainingCenterRepository::new(&self.pool).find_by_id(id).await
    }

    async fn find_training_center_by_name(&self, name: &str) -> Result<Option<TrainingCenter>> {
        TrainingCenterRepository::new(&self.pool)
            .find_by_name(name)
            .await
    }

    async fn count_athletes_in_training_center(&self, pk_id: i32) -> Result<i64> {
        TrainingCenterRepository::new(&self.pool)
            .count_athletes(pk_id)
            .await
    }

    async fn delete_training_center(&self, pk_id: i32) -> Result<()> {
        TrainingCenterRepository::new(&self.pool).delete(pk_id).await
    }
}

#[async_trait]
impl AthleteStore for Database {
    async fn insert_athletes(&self, athletes: &[NewAthlete]) -> Result<()> {
        AthleteRepository::new(&self.pool).create_many(athletes).await
    }

    async fn list_athletes(&self) -> Result<Vec<AthleteRecord>> {
        AthleteRepository::new(&self.pool).list().await
    }

    async fn find_athlete_by_id(&self, id: Uuid) -> Result<Option<AthleteRecord>> {
        AthleteRepository::new(&self.pool).find_by_id(id).await
    }

    async fn find_athlete_by_cpf(&self, cpf: &str) -> Result<Option<AthleteRecord>> {
        AthleteRepository::new(&self.pool).find_by_cpf(cpf).await
    }

    async fn update_athlete(&self, pk_id: i32, changes: &AthleteChanges) -> Result<()> {
        AthleteRepository::new(&self.pool).update(pk_id, changes).await
    }

    async fn delete_athlete(&self, pk_id: i32) -> Result<()> {
        AthleteRepository::new(&self.pool).delete(pk_id).await
    }
}
