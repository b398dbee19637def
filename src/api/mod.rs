//! HTTP surface: route builders and request plumbing.

pub mod authors;
pub mod books;
pub mod categories;
pub mod health;
pub mod publishers;

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;

/// JSON request body.
///
/// Same as [`axum::Json`] except that every rejection (malformed JSON,
/// missing or unknown fields, wrong content type) maps to a 400 validation
/// error instead of axum's mixed 400/415/422 defaults. The legacy surface
/// only ever answered malformed input with 400.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Body for successful POSTs.
#[derive(Debug, Serialize)]
pub struct Created {
    pub message: String,
}

/// 201 response with the legacy-style confirmation message.
pub fn created(entity: &str) -> (StatusCode, Json<Created>) {
    (
        StatusCode::CREATED,
        Json(Created {
            message: format!("{} added successfully", entity),
        }),
    )
}
