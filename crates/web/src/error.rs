use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use std::fmt;
use storage::error::StorageError;
use utoipa::ToSchema;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::response::ApiResponse;

/// One entry of `error.details.validation_errors`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    /// Request body or path failed to parse or validate
    Validation(Vec<FieldError>),
    /// Duplicate unique key
    Conflict(String),
    /// Referenced row missing or reference malformed
    BadRequest(String),
    NotFound(String),
    /// Deletion blocked by athletes still referencing the row
    InUse { message: String, linked_athletes: i64 },
    /// Write failed for a reason the client cannot act on. Only the
    /// message is returned; the cause is logged.
    Unexpected(String),
}

impl WebError {
    /// Classify a failed write: constraint violations are conflicts, a
    /// vanished row is not found, everything else is logged and hidden
    /// behind a generic message.
    pub fn from_write(error: StorageError, action: &str) -> Self {
        match error {
            StorageError::ConstraintViolation(msg) => Self::Conflict(msg),
            StorageError::NotFound => Self::NotFound("Resource not found".to_string()),
            other => {
                tracing::error!(error = ?other, "Failed to {}", action);
                Self::Unexpected(format!(
                    "An internal error occurred while trying to {action}."
                ))
            }
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Storage(StorageError::NotFound) => StatusCode::NOT_FOUND,
            Self::Storage(StorageError::ConstraintViolation(_)) => StatusCode::CONFLICT,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InUse { .. } => StatusCode::BAD_REQUEST,
            Self::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Validation(errors) => write!(f, "Validation error: {} field(s)", errors.len()),
            Self::Conflict(msg) => write!(f, "Conflict: {}", msg),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
            Self::InUse { message, .. } => write!(f, "In use: {}", message),
            Self::Unexpected(msg) => write!(f, "Unexpected error: {}", msg),
        }
    }
}

impl std::error::Error for WebError {}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let (message, details): (String, Value) = match self {
            Self::Storage(StorageError::NotFound) => ("Resource not found".to_string(), json!({})),
            Self::Storage(StorageError::ConstraintViolation(msg)) => (msg, json!({})),
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                ("An internal error occurred".to_string(), json!({}))
            }
            Self::Validation(errors) => (
                "Request validation failed".to_string(),
                json!({ "validation_errors": errors }),
            ),
            Self::Conflict(msg) | Self::BadRequest(msg) | Self::NotFound(msg) => (msg, json!({})),
            Self::InUse {
                message,
                linked_athletes,
            } => (message, json!({ "linked_athletes": linked_athletes })),
            Self::Unexpected(msg) => (msg, json!({})),
        };

        ApiResponse::failure(status_code, message, details).into_response_with(status_code)
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(flatten_validation_errors(None, &errors))
    }
}

/// Flatten nested validator output into `field.path: message` entries,
/// ordered by field path. `prefix` is prepended to every path.
pub fn flatten_validation_errors(prefix: Option<&str>, errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();
    collect_field_errors(prefix.map(str::to_string), errors, &mut out);
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

fn collect_field_errors(prefix: Option<String>, errors: &ValidationErrors, out: &mut Vec<FieldError>) {
    let join = |field: &str| match &prefix {
        Some(prefix) => format!("{prefix}.{field}"),
        None => field.to_string(),
    };

    for (field, kind) in errors.errors() {
        let path = join(&field.to_string());
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                out.extend(field_errors.iter().map(|e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value ({})", e.code));
                    FieldError::new(path.clone(), message)
                }));
            }
            ValidationErrorsKind::Struct(nested) => {
                collect_field_errors(Some(path), nested, out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_field_errors(Some(format!("{path}.{index}")), nested, out);
                }
            }
        }
    }
}

pub type WebResult<T> = Result<T, WebError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use storage::dto::athlete::CreateAthleteRequest;
    use validator::Validate;

    async fn body_json(error: WebError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_in_use_renders_bad_request_with_count() {
        let (status, body) = body_json(WebError::InUse {
            message: "blocked by 2 athletes".to_string(),
            linked_athletes: 2,
        })
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["data"], Value::Null);
        assert_eq!(body["error"]["code"], json!("400"));
        assert_eq!(body["error"]["details"]["linked_athletes"], json!(2));
    }

    #[tokio::test]
    async fn test_storage_failure_hides_details() {
        let (status, body) =
            body_json(WebError::Storage(StorageError::Database(sqlx_pool_closed()))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["message"], json!("An internal error occurred"));
    }

    #[test]
    fn test_from_write_maps_constraint_violation_to_conflict() {
        let error = WebError::from_write(
            StorageError::ConstraintViolation("duplicate".to_string()),
            "create the category",
        );
        assert_eq!(error.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_from_write_hides_unexpected_errors() {
        let error = WebError::from_write(
            StorageError::Database(sqlx_pool_closed()),
            "delete the category",
        );
        match error {
            WebError::Unexpected(msg) => assert_eq!(
                msg,
                "An internal error occurred while trying to delete the category."
            ),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_nested_validation_errors_use_dotted_paths() {
        let request: CreateAthleteRequest = serde_json::from_value(json!({
            "nome": "",
            "cpf": "12345678900",
            "idade": 25,
            "peso": 75.5,
            "altura": 1.75,
            "sexo": "M",
            "categoria": {"nome": ""},
            "centro_treinamento": {"nome": "CT King"}
        }))
        .unwrap();

        let errors = request.validate().unwrap_err();
        let fields: Vec<String> = flatten_validation_errors(Some("0"), &errors)
            .into_iter()
            .map(|e| e.field)
            .collect();

        assert_eq!(fields, vec!["0.categoria.nome", "0.nome"]);
    }

    fn sqlx_pool_closed() -> sqlx::Error {
        sqlx::Error::PoolClosed
    }
}
