//! Persistence layer of the workout API: row models, request/response DTOs,
//! store traits and their PostgreSQL implementation.

mod database;
pub mod dto;
pub mod error;
#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod models;
pub mod repository;
pub mod store;

pub use database::Database;
pub use store::{AthleteStore, CategoryStore, Store, TrainingCenterStore};
