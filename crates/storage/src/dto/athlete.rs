use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::AthleteRecord;

/// Reference to a category or training center by its unique name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct NamedReference {
    #[validate(length(
        min = 1,
        max = 50,
        message = "Name must be between 1 and 50 characters"
    ))]
    pub nome: String,
}

/// Reference used when updating an athlete. A missing name is rejected by
/// the service rather than at parse time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct NamedReferenceUpdate {
    #[validate(length(max = 50, message = "Name must be at most 50 characters"))]
    pub nome: Option<String>,
}

/// Request payload for creating a new athlete
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateAthleteRequest {
    #[validate(length(
        min = 1,
        max = 50,
        message = "Name must be between 1 and 50 characters"
    ))]
    #[schema(example = "Joao")]
    pub nome: String,

    #[validate(length(
        min = 1,
        max = 11,
        message = "CPF must be between 1 and 11 characters"
    ))]
    #[schema(example = "12345678900")]
    pub cpf: String,

    #[schema(example = 25)]
    pub idade: i32,

    #[validate(custom(function = "validate_positive"))]
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 75.5)]
    pub peso: Decimal,

    #[validate(custom(function = "validate_positive"))]
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 1.70)]
    pub altura: Decimal,

    #[validate(length(equal = 1, message = "Sex must be a single character"))]
    #[schema(example = "M")]
    pub sexo: String,

    #[validate(nested)]
    pub categoria: NamedReference,

    #[validate(nested)]
    pub centro_treinamento: NamedReference,
}

/// Request payload for a partial athlete update. Absent fields are left
/// untouched; `null` is treated as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateAthleteRequest {
    #[serde(default)]
    pub idade: Option<i32>,

    #[validate(custom(function = "validate_positive"))]
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    pub peso: Option<Decimal>,

    #[validate(custom(function = "validate_positive"))]
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    pub altura: Option<Decimal>,

    #[validate(nested)]
    #[serde(default)]
    pub categoria: Option<NamedReferenceUpdate>,

    #[validate(nested)]
    #[serde(default)]
    pub centro_treinamento: Option<NamedReferenceUpdate>,
}

/// Athlete as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AthleteResponse {
    pub id: Uuid,
    pub created_at: NaiveDateTime,
    pub nome: String,
    pub cpf: String,
    pub idade: i32,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub peso: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub altura: Decimal,
    pub sexo: String,
    pub categoria: NamedReference,
    pub centro_treinamento: NamedReference,
}

fn validate_positive(value: &Decimal) -> Result<(), validator::ValidationError> {
    if value.is_sign_positive() && !value.is_zero() {
        Ok(())
    } else {
        let mut error = validator::ValidationError::new("positive");
        error.message = Some("Value must be greater than 0".into());
        Err(error)
    }
}

impl From<AthleteRecord> for AthleteResponse {
    fn from(record: AthleteRecord) -> Self {
        let athlete = record.athlete;
        Self {
            id: athlete.id,
            created_at: athlete.created_at,
            nome: athlete.name,
            cpf: athlete.cpf,
            idade: athlete.age,
            peso: athlete.weight,
            altura: athlete.height,
            sexo: athlete.sex,
            categoria: NamedReference {
                nome: record.category_name,
            },
            centro_treinamento: NamedReference {
                nome: record.training_center_name,
            },
        }
    }
}
