use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{AthleteChanges, AthleteRecord, NewAthlete};

const SELECT_ATHLETE: &str = r#"
    SELECT a.pk_id, a.id, a.name, a.cpf, a.age, a.weight, a.height, a.sex,
           a.created_at, a.category_id, a.training_center_id,
           c.name AS category_name,
           t.name AS training_center_name
    FROM athletes a
    JOIN categories c ON c.pk_id = a.category_id
    JOIN training_centers t ON t.pk_id = a.training_center_id
"#;

pub struct AthleteRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AthleteRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all athletes
    pub async fn list(&self) -> Result<Vec<AthleteRecord>> {
        let athletes = sqlx::query_as::<_, AthleteRecord>(&format!(
            "{SELECT_ATHLETE} ORDER BY a.pk_id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(athletes)
    }

    /// Find athlete by external ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<AthleteRecord>> {
        let athlete = sqlx::query_as::<_, AthleteRecord>(&format!("{SELECT_ATHLETE} WHERE a.id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(athlete)
    }

    pub async fn find_by_cpf(&self, cpf: &str) -> Result<Option<AthleteRecord>> {
        let athlete =
            sqlx::query_as::<_, AthleteRecord>(&format!("{SELECT_ATHLETE} WHERE a.cpf = $1"))
                .bind(cpf)
                .fetch_optional(self.pool)
                .await?;

        Ok(athlete)
    }

    /// Insert a batch of athletes inside one transaction.
    /// Dropping the transaction on error rolls back every row of the batch.
    pub async fn create_many(&self, athletes: &[NewAthlete]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for athlete in athletes {
            sqlx::query(
                r#"
                INSERT INTO athletes (
                    id, name, cpf, age, weight, height, sex, created_at,
                    category_id, training_center_id
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                "#,
            )
            .bind(athlete.id)
            .bind(&athlete.name)
            .bind(&athlete.cpf)
            .bind(athlete.age)
            .bind(athlete.weight)
            .bind(athlete.height)
            .bind(&athlete.sex)
            .bind(athlete.created_at)
            .bind(athlete.category_id)
            .bind(athlete.training_center_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| insert_error(e.into(), &athlete.cpf))?;
        }

        tx.commit().await?;
        tracing::debug!(count = athletes.len(), "Athlete batch committed");

        Ok(())
    }

    /// Update the present fields of an athlete
    pub async fn update(&self, pk_id: i32, changes: &AthleteChanges) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE athletes
            SET age = COALESCE($2, age),
                weight = COALESCE($3, weight),
                height = COALESCE($4, height),
                category_id = COALESCE($5, category_id),
                training_center_id = COALESCE($6, training_center_id)
            WHERE pk_id = $1
            "#,
        )
        .bind(pk_id)
        .bind(changes.age)
        .bind(changes.weight)
        .bind(changes.height)
        .bind(changes.category_id)
        .bind(changes.training_center_id)
        .execute(self.pool)
        .await
        .map_err(|e| {
            StorageError::from(e).on_foreign_key_violation(
                "The referenced category or training center no longer exists.",
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    /// Delete an athlete by internal key
    pub async fn delete(&self, pk_id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM athletes WHERE pk_id = $1")
            .bind(pk_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

// A concurrent insert may take the CPF, or a concurrent delete may remove
// the category or training center, between staging and commit.
fn insert_error(error: StorageError, cpf: &str) -> StorageError {
    error
        .on_unique_violation(format!("An athlete with CPF '{cpf}' is already registered."))
        .on_foreign_key_violation("The referenced category or training center no longer exists.")
}
