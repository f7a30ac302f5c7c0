use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Row of the `athletes` table. References are internal keys only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Athlete {
    pub pk_id: i32,
    pub id: Uuid,
    pub name: String,
    pub cpf: String,
    pub age: i32,
    pub weight: Decimal,
    pub height: Decimal,
    pub sex: String,
    pub created_at: NaiveDateTime,
    pub category_id: i32,
    pub training_center_id: i32,
}

/// An athlete joined with the names of the rows it references
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AthleteRecord {
    #[sqlx(flatten)]
    pub athlete: Athlete,
    pub category_name: String,
    pub training_center_name: String,
}

/// An athlete staged for insertion, with references already resolved
#[derive(Debug, Clone)]
pub struct NewAthlete {
    pub id: Uuid,
    pub name: String,
    pub cpf: String,
    pub age: i32,
    pub weight: Decimal,
    pub height: Decimal,
    pub sex: String,
    pub created_at: NaiveDateTime,
    pub category_id: i32,
    pub training_center_id: i32,
}

/// Partial update of an athlete. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AthleteChanges {
    pub age: Option<i32>,
    pub weight: Option<Decimal>,
    pub height: Option<Decimal>,
    pub category_id: Option<i32>,
    pub training_center_id: Option<i32>,
}

impl AthleteChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
