use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Category, NewCategory};

/// Repository for Category database operations
pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all categories
    pub async fn list(&self) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT pk_id, id, name
            FROM categories
            ORDER BY pk_id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(categories)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT pk_id, id, name
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(category)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT pk_id, id, name
            FROM categories
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        Ok(category)
    }

    /// Create a new category
    pub async fn create(&self, category: &NewCategory) -> Result<Category> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (id, name)
            VALUES ($1, $2)
            RETURNING pk_id, id, name
            "#,
        )
        .bind(category.id)
        .bind(&category.name)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            StorageError::from(e).on_unique_violation(format!(
                "A category named '{}' already exists.",
                category.name
            ))
        })?;

        Ok(category)
    }

    /// Count athletes linked to a category
    pub async fn count_athletes(&self, pk_id: i32) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM athletes WHERE category_id = $1",
        )
        .bind(pk_id)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    /// Delete a category by internal key
    pub async fn delete(&self, pk_id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM categories WHERE pk_id = $1")
            .bind(pk_id)
            .execute(self.pool)
            .await
            .map_err(|e| {
                StorageError::from(e)
                    .on_foreign_key_violation("The category is still referenced by athletes.")
            })?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
