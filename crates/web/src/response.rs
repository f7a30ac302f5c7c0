//! Uniform envelope wrapped around every response body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiErrorBody {
    /// HTTP status code as a string, e.g. `"404"`
    pub code: String,
    pub message: String,
    #[schema(value_type = Object)]
    pub details: Value,
}

/// `{success, data, error}`: exactly one of `data` and `error` is non-null.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiErrorBody>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

impl ApiResponse<()> {
    pub fn failure(status: StatusCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiErrorBody {
                code: status.as_u16().to_string(),
                message: message.into(),
                details,
            }),
        }
    }
}

/// Wrap `data` in a success envelope with the given status
pub fn success<T: Serialize>(status: StatusCode, data: T) -> Response {
    ApiResponse::ok(data).into_response_with(status)
}
