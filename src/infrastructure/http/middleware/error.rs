use crate::domain::errors::DomainError;
use crate::shared::utils::format_error_chain;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use std::fmt;

/// A single failed form field
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn required(field: &str) -> Self {
        Self {
            field: field.to_string(),
            message: format!("The {} field is required.", field),
        }
    }
}

/// Error details awaiting a correlation ID.
///
/// Attached to 500 responses; the error handling middleware renders it.
#[derive(Debug, Clone)]
pub struct ErrorReport(pub String);

#[derive(Debug)]
pub enum ApiError {
    Validation(Vec<FieldError>),
    BadRequest(String),
    Domain(DomainError),
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(errors) => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                write!(f, "Validation failed: {}", fields.join(", "))
            }
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Domain(err) => write!(f, "{}", err),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Domain(err) => std::error::Error::source(err),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let report = match self {
            ApiError::Validation(errors) => {
                return (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response();
            }
            ApiError::BadRequest(msg) => {
                return (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response();
            }
            ApiError::Domain(err) => format_error_chain(&err),
            ApiError::Internal(msg) => msg,
        };

        let mut response = (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": report.clone() })),
        )
            .into_response();
        response.extensions_mut().insert(ErrorReport(report));
        response
    }
}

// Convert from domain errors
impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Domain(err)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
