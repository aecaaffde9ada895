//! Error-handling middleware.
//!
//! Handler errors already render through [`AppError`]; this layer covers
//! what escapes them: panics become a JSON 500 and every server error is
//! logged with its method and path.

use std::any::Any;

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::errors::{AppError, ErrorResponse};

/// Layer turning handler panics into a 500 response.
pub fn catch_panic_layer() -> CatchPanicLayer<fn(Box<dyn Any + Send + 'static>) -> Response> {
    CatchPanicLayer::custom(panic_response as fn(Box<dyn Any + Send + 'static>) -> Response)
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!("Request handler panicked: {}", detail);

    let error = AppError::internal(detail);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(error.code(), "An internal error occurred")),
    )
        .into_response()
}

/// Log every 5xx response.
pub async fn log_server_errors(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    if response.status().is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = response.status().as_u16(),
            "Request failed"
        );
    }

    response
}
