//! Router assembly: HTTP endpoints, WebSocket upgrade, static files, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;
pub mod ws;

/// Build the application router with:
/// - WebSocket at `/ws`
/// - practice API under `/api/v1/...`
/// - the practice apps' shell from `./static` with index fallback
/// - permissive CORS and per-request trace spans
pub fn build_router(state: Arc<AppState>) -> Router {
    let static_service = ServeDir::new("./static")
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new("./static/index.html"));

    Router::new()
        .route("/ws", get(ws::ws_upgrade))
        .route("/api/v1/health", get(http::http_health))
        .route(
            "/api/v1/session",
            post(http::http_post_session).delete(http::http_delete_session),
        )
        .route("/api/v1/problem", get(http::http_get_problem))
        .route("/api/v1/answer", post(http::http_post_answer))
        .route("/api/v1/hint", get(http::http_get_hint))
        .route("/api/v1/quiz", post(http::http_post_quiz))
        .route("/api/v1/score", get(http::http_get_score))
        .route("/api/v1/score/reset", post(http::http_post_score_reset))
        .route("/api/v1/relationship", get(http::http_get_relationship))
        .route("/api/v1/convert", post(http::http_post_convert))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .fallback_service(static_service)
}
