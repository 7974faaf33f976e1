use crate::infrastructure::http::middleware::{ApiError, AppState};
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Cookie holding the antiforgery cookie token
pub const ANTIFORGERY_COOKIE_NAME: &str = "antiforgery";

/// Header clients use to echo the request token
pub const ANTIFORGERY_HEADER_NAME: &str = "X-XSRF-TOKEN";

/// Generate a new CSRF token (32 random bytes = 64 hex characters)
pub fn generate_csrf_token() -> String {
    let bytes: [u8; 32] = rand::thread_rng().gen();
    hex::encode(bytes)
}

/// Derive the request token paired with a cookie token
///
/// The request token is the hex HMAC-SHA256 of the cookie token under the
/// server secret, so it can only be produced by this server.
pub fn derive_request_token(cookie_token: &str, secret: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(cookie_token.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Validate an antiforgery token pair
///
/// The cookie token and the request token from the header must both be
/// present, and the request token must be the signature of the cookie token.
pub fn validate_antiforgery_tokens(
    header_token: Option<&str>,
    cookie_token: Option<&str>,
    secret: &[u8],
) -> Result<(), String> {
    let cookie_token = match cookie_token {
        None => return Err("Missing antiforgery cookie".to_string()),
        Some(token) if token.is_empty() => return Err("Empty antiforgery cookie".to_string()),
        Some(token) => token,
    };

    let header_token = match header_token {
        None => return Err("Missing antiforgery token in request header".to_string()),
        Some(token) if token.is_empty() => {
            return Err("Empty antiforgery token in request header".to_string())
        }
        Some(token) => token,
    };

    let signature =
        hex::decode(header_token).map_err(|_| "Malformed antiforgery token".to_string())?;

    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(cookie_token.as_bytes());
    // Constant-time comparison
    mac.verify_slice(&signature)
        .map_err(|_| "Antiforgery token mismatch".to_string())
}

/// Antiforgery settings shared through the application state
#[derive(Clone)]
pub struct AntiforgeryConfig {
    pub enabled: bool,
    pub secret: std::sync::Arc<Vec<u8>>,
    /// Whether to require validation for GET requests (default: false)
    pub validate_get: bool,
}

impl AntiforgeryConfig {
    pub fn new(enabled: bool, secret: Vec<u8>) -> Self {
        Self {
            enabled,
            secret: std::sync::Arc::new(secret),
            validate_get: false,
        }
    }
}

/// Extract the request token from request headers
pub fn extract_csrf_from_headers(headers: &HeaderMap, header_name: &str) -> Option<String> {
    headers
        .get(header_name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

/// Check if HTTP method requires CSRF validation
pub fn method_requires_csrf(method: &str, validate_get: bool) -> bool {
    match method {
        "GET" | "HEAD" | "OPTIONS" => validate_get,
        "POST" | "PUT" | "PATCH" | "DELETE" => true,
        _ => false,
    }
}

/// Antiforgery validation middleware for Axum
///
/// Rejects state-changing requests whose header token does not match the
/// cookie token issued by `GET /antiforgery/token`.
pub async fn antiforgery_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let config = &state.antiforgery;
    let method = request.method().as_str();

    if !config.enabled || !method_requires_csrf(method, config.validate_get) {
        return Ok(next.run(request).await);
    }

    let header_token = extract_csrf_from_headers(&headers, ANTIFORGERY_HEADER_NAME);
    let cookie_token = jar.get(ANTIFORGERY_COOKIE_NAME).map(|c| c.value().to_string());

    validate_antiforgery_tokens(
        header_token.as_deref(),
        cookie_token.as_deref(),
        &config.secret,
    )
    .map_err(|err| {
        tracing::warn!("Antiforgery validation failed: {}", err);
        ApiError::BadRequest(format!("Antiforgery validation failed: {}", err))
    })?;

    Ok(next.run(request).await)
}
