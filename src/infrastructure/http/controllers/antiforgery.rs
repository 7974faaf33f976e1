use crate::infrastructure::http::middleware::AppState;
use crate::shared::csrf::{derive_request_token, generate_csrf_token, ANTIFORGERY_COOKIE_NAME};
use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

/// GET /antiforgery/token - Issue an antiforgery request token
///
/// Reuses the caller's cookie token when present, otherwise sets a new one.
/// The body is the request token to send back in the `X-XSRF-TOKEN` header.
pub async fn issue_token(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<String>) {
    let cookie_token = jar
        .get(ANTIFORGERY_COOKIE_NAME)
        .map(|c| c.value().to_string())
        .filter(|token| !token.is_empty())
        .unwrap_or_else(generate_csrf_token);

    let request_token = derive_request_token(&cookie_token, &state.antiforgery.secret);

    let cookie = Cookie::build((ANTIFORGERY_COOKIE_NAME, cookie_token))
        .http_only(true)
        .same_site(SameSite::Strict)
        .path("/");

    (jar.add(cookie), Json(request_token))
}
