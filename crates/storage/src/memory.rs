//! In-memory store with the same constraints as the PostgreSQL schema:
//! unique category/training-center names, unique athlete CPF, foreign keys
//! checked on write and restricted on delete.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{
    Athlete, AthleteChanges, AthleteRecord, Category, NewAthlete, NewCategory, NewTrainingCenter,
    TrainingCenter,
};
use crate::store::{AthleteStore, CategoryStore, TrainingCenterStore};

#[derive(Debug, Default)]
struct Tables {
    categories: Vec<Category>,
    training_centers: Vec<TrainingCenter>,
    athletes: Vec<Athlete>,
    next_pk: i32,
    unavailable: bool,
}

impl Tables {
    fn next_pk(&mut self) -> i32 {
        self.next_pk += 1;
        self.next_pk
    }

    fn ensure_available(&self) -> Result<()> {
        if self.unavailable {
            return Err(StorageError::Database(sqlx::Error::PoolClosed));
        }
        Ok(())
    }

    fn record(&self, athlete: &Athlete) -> Option<AthleteRecord> {
        let category = self
            .categories
            .iter()
            .find(|c| c.pk_id == athlete.category_id)?;
        let center = self
            .training_centers
            .iter()
            .find(|t| t.pk_id == athlete.training_center_id)?;

        Some(AthleteRecord {
            athlete: athlete.clone(),
            category_name: category.name.clone(),
            training_center_name: center.name.clone(),
        })
    }

    fn check_references(&self, category_id: i32, training_center_id: i32) -> Result<()> {
        let category_exists = self.categories.iter().any(|c| c.pk_id == category_id);
        let center_exists = self
            .training_centers
            .iter()
            .any(|t| t.pk_id == training_center_id);

        if category_exists && center_exists {
            Ok(())
        } else {
            Err(StorageError::ConstraintViolation(
                "The referenced category or training center no longer exists.".to_string(),
            ))
        }
    }
}

/// Store kept entirely in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every write fail with a database error, as if the connection
    /// pool had gone away. Reads keep working.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.tables().unavailable = unavailable;
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn insert_category(&self, category: &NewCategory) -> Result<Category> {
        let mut tables = self.tables();
        tables.ensure_available()?;

        if tables.categories.iter().any(|c| c.name == category.name) {
            return Err(StorageError::ConstraintViolation(format!(
                "A category named '{}' already exists.",
                category.name
            )));
        }

        let row = Category {
            pk_id: tables.next_pk(),
            id: category.id,
            name: category.name.clone(),
        };
        tables.categories.push(row.clone());

        Ok(row)
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        Ok(self.tables().categories.clone())
    }

    async fn find_category_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        Ok(self.tables().categories.iter().find(|c| c.id == id).cloned())
    }

    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>> {
        Ok(self
            .tables()
            .categories
            .iter()
            .find(|c| c.name == name)
            .cloned())
    }

    async fn count_athletes_in_category(&self, pk_id: i32) -> Result<i64> {
        let count = self
            .tables()
            .athletes
            .iter()
            .filter(|a| a.category_id == pk_id)
            .count();
        Ok(count as i64)
    }

    async fn delete_category(&self, pk_id: i32) -> Result<()> {
        let mut tables = self.tables();
        tables.ensure_available()?;

        if tables.athletes.iter().any(|a| a.category_id == pk_id) {
            return Err(StorageError::ConstraintViolation(
                "The category is still referenced by athletes.".to_string(),
            ));
        }

        let before = tables.categories.len();
        tables.categories.retain(|c| c.pk_id != pk_id);
        if tables.categories.len() == before {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl TrainingCenterStore for MemoryStore {
    async fn insert_training_center(&self, center: &NewTrainingCenter) -> Result<TrainingCenter> {
        let mut tables = self.tables();
        tables.ensure_available()?;

        if tables.training_centers.iter().any(|t| t.name == center.name) {
            return Err(StorageError::ConstraintViolation(format!(
                "A training center named '{}' already exists.",
                center.name
            )));
        }

        let row = TrainingCenter {
            pk_id: tables.next_pk(),
            id: center.id,
            name: center.name.clone(),
            address: center.address.clone(),
            owner: center.owner.clone(),
        };
        tables.training_centers.push(row.clone());

        Ok(row)
    }

    async fn list_training_centers(&self) -> Result<Vec<TrainingCenter>> {
        Ok(self.tables().training_centers.clone())
    }

    async fn find_training_center_by_id(&self, id: Uuid) -> Result<Option<TrainingCenter>> {
        Ok(self
            .tables()
            .training_centers
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn find_training_center_by_name(&self, name: &str) -> Result<Option<TrainingCenter>> {
        Ok(self
            .tables()
            .training_centers
            .iter()
            .find(|t| t.name == name)
            .cloned())
    }

    async fn count_athletes_in_training_center(&self, pk_id: i32) -> Result<i64> {
        let count = self
            .tables()
            .athletes
            .iter()
            .filter(|a| a.training_center_id == pk_id)
            .count();
        Ok(count as i64)
    }

    async fn delete_training_center(&self, pk_id: i32) -> Result<()> {
        let mut tables = self.tables();
        tables.ensure_available()?;

        if tables.athletes.iter().any(|a| a.training_center_id == pk_id) {
            return Err(StorageError::ConstraintViolation(
                "The training center is still referenced by athletes.".to_string(),
            ));
        }

        let before = tables.training_centers.len();
        tables.training_centers.retain(|t| t.pk_id != pk_id);
        if tables.training_centers.len() == before {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl AthleteStore for MemoryStore {
    async fn insert_athletes(&self, athletes: &[NewAthlete]) -> Result<()> {
        let mut tables = self.tables();
        tables.ensure_available()?;

        // Validate the whole batch before touching the table.
        for (index, athlete) in athletes.iter().enumerate() {
            let duplicate_in_table = tables.athletes.iter().any(|a| a.cpf == athlete.cpf);
            let duplicate_in_batch = athletes[..index].iter().any(|a| a.cpf == athlete.cpf);
            if duplicate_in_table || duplicate_in_batch {
                return Err(StorageError::ConstraintViolation(format!(
                    "An athlete with CPF '{}' is already registered.",
                    athlete.cpf
                )));
            }
            tables.check_references(athlete.category_id, athlete.training_center_id)?;
        }

        for athlete in athletes {
            let row = Athlete {
                pk_id: tables.next_pk(),
                id: athlete.id,
                name: athlete.name.clone(),
                cpf: athlete.cpf.clone(),
                age: athlete.age,
                weight: athlete.weight,
                height: athlete.height,
                sex: athlete.sex.clone(),
                created_at: athlete.created_at,
                category_id: athlete.category_id,
                training_center_id: athlete.training_center_id,
            };
            tables.athletes.push(row);
        }

        Ok(())
    }

    async fn list_athletes(&self) -> Result<Vec<AthleteRecord>> {
        let tables = self.tables();
        Ok(tables
            .athletes
            .iter()
            .filter_map(|a| tables.record(a))
            .collect())
    }

    async fn find_athlete_by_id(&self, id: Uuid) -> Result<Option<AthleteRecord>> {
        let tables = self.tables();
        Ok(tables
            .athletes
            .iter()
            .find(|a| a.id == id)
            .and_then(|a| tables.record(a)))
    }

    async fn find_athlete_by_cpf(&self, cpf: &str) -> Result<Option<AthleteRecord>> {
        let tables = self.tables();
        Ok(tables
            .athletes
            .iter()
            .find(|a| a.cpf == cpf)
            .and_then(|a| tables.record(a)))
    }

    async fn update_athlete(&self, pk_id: i32, changes: &AthleteChanges) -> Result<()> {
        let mut tables = self.tables();
        tables.ensure_available()?;

        let current = tables
            .athletes
            .iter()
            .find(|a| a.pk_id == pk_id)
            .cloned()
            .ok_or(StorageError::NotFound)?;

        let category_id = changes.category_id.unwrap_or(current.category_id);
        let training_center_id = changes
            .training_center_id
            .unwrap_or(current.training_center_id);
        tables.check_references(category_id, training_center_id)?;

        if let Some(athlete) = tables.athletes.iter_mut().find(|a| a.pk_id == pk_id) {
            athlete.age = changes.age.unwrap_or(athlete.age);
            athlete.weight = changes.weight.unwrap_or(athlete.weight);
            athlete.height = changes.height.unwrap_or(athlete.height);
            athlete.category_id = category_id;
            athlete.training_center_id = training_center_id;
        }

        Ok(())
    }

    async fn delete_athlete(&self, pk_id: i32) -> Result<()> {
        let mut tables = self.tables();
        tables.ensure_available()?;

        let before = tables.athletes.len();
        tables.athletes.retain(|a| a.pk_id != pk_id);
        if tables.athletes.len() == before {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
