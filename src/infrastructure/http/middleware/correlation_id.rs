use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::fmt;
use uuid::Uuid;

pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

/// Longest inbound correlation ID accepted as-is
const MAX_CORRELATION_ID_LEN: usize = 128;

/// Per-request identifier used to tie logs and error bodies together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationId(pub String);

impl CorrelationId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Read a usable correlation ID from the inbound headers
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get(CORRELATION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty() && v.len() <= MAX_CORRELATION_ID_LEN)
            .map(|v| Self(v.to_string()))
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Attach a correlation ID to the request and echo it on the response
pub async fn correlation_id_middleware(mut request: Request, next: Next) -> Response {
    let correlation_id =
        CorrelationId::from_headers(request.headers()).unwrap_or_else(CorrelationId::generate);

    request.extensions_mut().insert(correlation_id.clone());

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&correlation_id.0) {
        response.headers_mut().insert(CORRELATION_ID_HEADER, value);
    }

    response
}
