//! Request extractors that reject with the API's own error envelope
//! instead of axum's plain-text rejections.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use storage::dto::common::OneOrMany;
use uuid::Uuid;
use validator::Validate;

use crate::error::{FieldError, WebError, flatten_validation_errors};

/// JSON body parsed with serde only
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| WebError::Validation(vec![FieldError::new("body", e.body_text())]))?;

        let value = serde_json::from_slice(&bytes).map_err(|e| {
            let message = e.to_string();
            WebError::Validation(vec![FieldError::new(field_from_serde_message(&message), message)])
        })?;

        Ok(Self(value))
    }
}

/// JSON body parsed with serde, then checked with its `validator` rules
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(value) = JsonBody::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// JSON body holding one item or a list of items, each checked with its
/// `validator` rules. Errors of list items are prefixed with their index.
pub struct ValidatedBatch<T>(pub OneOrMany<T>);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedBatch<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(payload) = JsonBody::<OneOrMany<T>>::from_request(req, state).await?;

        let errors: Vec<FieldError> = match &payload {
            OneOrMany::One(item) => item
                .validate()
                .err()
                .map(|e| flatten_validation_errors(None, &e))
                .unwrap_or_default(),
            OneOrMany::Many(items) => items
                .iter()
                .enumerate()
                .filter_map(|(index, item)| {
                    item.validate()
                        .err()
                        .map(|e| flatten_validation_errors(Some(&index.to_string()), &e))
                })
                .flatten()
                .collect(),
        };

        if !errors.is_empty() {
            return Err(WebError::Validation(errors));
        }

        Ok(Self(payload))
    }
}

/// External identifier taken from the `{id}` path segment
pub struct EntityId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<Uuid>::from_request_parts(parts, state)
            .await
            .map_err(|e| WebError::Validation(vec![FieldError::new("id", e.body_text())]))?;

        Ok(Self(id))
    }
}

// serde_json names the field in backticks for missing/unknown field errors.
fn field_from_serde_message(message: &str) -> String {
    let is_field_error = message.contains("missing field") || message.contains("unknown field");
    let name = message
        .split('`')
        .nth(1)
        .filter(|_| is_field_error)
        .unwrap_or("body");

    match message.strip_prefix("item ").and_then(|rest| rest.split(':').next()) {
        Some(index) if name != "body" => format!("{index}.{name}"),
        _ => name.to_string(),
    }
}
