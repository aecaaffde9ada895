//! JWT authentication middleware.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use super::TokenService;
use crate::errors::AppError;

/// Authenticated caller extracted from the bearer token
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub subject: String,
}

/// Bearer authentication middleware.
///
/// Validates the token from the `Authorization` header, then injects
/// the [`CurrentUser`] into the request extensions.
pub async fn require_bearer(
    State(tokens): State<Arc<dyn TokenService>>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or(AppError::Unauthorized)?;

    let claims = tokens.verify(bearer.token())?;

    request.extensions_mut().insert(CurrentUser {
        subject: claims.sub,
    });

    Ok(next.run(request).await)
}
