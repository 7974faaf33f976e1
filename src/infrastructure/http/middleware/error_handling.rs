use super::correlation_id::CorrelationId;
use super::error::{ApiError, ErrorReport};
use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::any::Any;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub correlation_id: String,
}

/// Top-level error handler
///
/// Every response carrying an [`ErrorReport`] is logged and rewritten into an
/// [`ErrorBody`] stamped with the request's correlation ID.
pub async fn error_handling_middleware(request: Request, next: Next) -> Response {
    let correlation_id = request
        .extensions()
        .get::<CorrelationId>()
        .cloned()
        .unwrap_or_else(CorrelationId::generate);
    let method = request.method().clone();
    let uri = request.uri().clone();

    let mut response = next.run(request).await;

    let Some(ErrorReport(error)) = response.extensions_mut().remove::<ErrorReport>() else {
        return response;
    };

    tracing::error!(
        correlation_id = %correlation_id,
        method = %method,
        uri = %uri,
        "Unhandled error has occurred: {}",
        error
    );

    let body = ErrorBody {
        error,
        correlation_id: correlation_id.0,
    };
    (response.status(), Json(body)).into_response()
}

/// Turn a handler panic into an internal error response
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    ApiError::Internal(format!("Request handler panicked: {}", detail)).into_response()
}
