use crate::infrastructure::http::controllers;
use crate::infrastructure::http::middleware::{
    correlation_id_middleware, error_handling_middleware, handle_panic, AppState, CorrelationId,
};
use crate::shared::csrf::antiforgery_middleware;
use axum::{
    extract::{DefaultBodyLimit, Request},
    routing::{get, post},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

pub fn build_router(state: AppState) -> Router {
    // State-changing routes (require an antiforgery token)
    let protected = Router::new()
        .route("/translate", post(controllers::translate::translate))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            antiforgery_middleware,
        ));

    // Layers run outermost-last: correlation ID, tracing, error handling, panics
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/antiforgery/token",
            get(controllers::antiforgery::issue_token),
        )
        .merge(protected)
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(axum::middleware::from_fn(error_handling_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(axum::middleware::from_fn(correlation_id_middleware))
        .with_state(state)
}

fn make_request_span(request: &Request) -> tracing::Span {
    let correlation_id = request
        .extensions()
        .get::<CorrelationId>()
        .map(|id| id.0.as_str())
        .unwrap_or("-");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        correlation_id = %correlation_id,
    )
}

async fn health_handler() -> &'static str {
    "OK"
}
