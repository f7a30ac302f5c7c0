use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{NewTrainingCenter, TrainingCenter};

/// Repository for TrainingCenter database operations
pub struct TrainingCenterRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TrainingCenterRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all training centers
    pub async fn list(&self) -> Result<Vec<TrainingCenter>> {
        let centers = sqlx::query_as::<_, TrainingCenter>(
            r#"
            SELECT pk_id, id, name, address, owner
            FROM training_centers
            ORDER BY pk_id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(centers)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<TrainingCenter>> {
        let center = sqlx::query_as::<_, TrainingCenter>(
            r#"
            SELECT pk_id, id, name, address, owner
            FROM training_centers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(center)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<TrainingCenter>> {
        let center = sqlx::query_as::<_, TrainingCenter>(
            r#"
            SELECT pk_id, id, name, address, owner
            FROM training_centers
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        Ok(center)
    }

    /// Create a new training center
    pub async fn create(&self, center: &NewTrainingCenter) -> Result<TrainingCenter> {
        let created = sqlx::query_as::<_, TrainingCenter>(
            r#"
            INSERT INTO training_centers (id, name, address, owner)
            VALUES ($1, $2, $3, $4)
            RETURNING pk_id, id, name, address, owner
            "#,
        )
        .bind(center.id)
        .bind(&center.name)
        .bind(&center.address)
        .bind(&center.owner)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            StorageError::from(e).on_unique_violation(format!(
                "A training center named '{}' already exists.",
                center.name
            ))
        })?;

        Ok(created)
    }

    pub async fn count_athletes(&self, pk_id: i32) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM athletes WHERE training_center_id = $1",
        )
        .bind(pk_id)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    /// Delete a training center by internal key
    pub async fn delete(&self, pk_id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM training_centers WHERE pk_id = $1")
            .bind(pk_id)
            .execute(self.pool)
            .await
            .map_err(|e| {
                StorageError::from(e)
                    .on_foreign_key_violation("The training center is still referenced by athletes.")
            })?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
