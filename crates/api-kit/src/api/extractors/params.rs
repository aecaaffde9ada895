//! Path and query extractors that reject with [`AppError`].
//!
//! axum's own `Path` and `Query` answer a malformed id or query string
//! with a plain-text body; these wrappers keep the JSON error envelope.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path, Query},
    http::{request::Parts, StatusCode},
};
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// `Path<T>` rejecting with a `BAD_REQUEST` error body.
pub struct PathParam<T>(pub T);

/// `Query<T>` rejecting with a `BAD_REQUEST` error body.
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for PathParam<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| rejection(e.status(), e.body_text()))?;
        Ok(PathParam(value))
    }
}

#[async_trait]
impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| rejection(e.status(), e.body_text()))?;
        Ok(QueryParams(value))
    }
}

// missing route parameters stay server errors
fn rejection(status: StatusCode, message: String) -> AppError {
    if status.is_server_error() {
        AppError::internal(message)
    } else {
        AppError::bad_request(message)
    }
}
