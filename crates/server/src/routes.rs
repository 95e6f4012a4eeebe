use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use common::types::{Health, Message};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::middleware::{client_ip, read_only_guard};
use crate::state::AppState;

pub mod admin;
pub mod quotes;

/// Liveness probe; never touches the store.
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Unknown paths; registered before the middleware so the read-only guard covers it.
pub async fn not_found() -> (StatusCode, Json<Message>) {
    (StatusCode::NOT_FOUND, Json(Message::new("not found")))
}

/// Build the full application router: quote routes, admin routes and health.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let quote_routes = Router::new()
        .route("/quotes", get(quotes::list_quotes).post(quotes::create_quote))
        .route("/quote", get(quotes::random_quote))
        .route("/quote/next", get(quotes::next_quote))
        .route("/quote/:id", get(quotes::quote_by_id));

    let admin_routes = Router::new()
        .route("/reload", post(admin::reload))
        .route("/metrics", get(admin::metrics));

    Router::new()
        .route("/health", get(health))
        .merge(quote_routes)
        .merge(admin_routes)
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), read_only_guard))
        .layer(middleware::from_fn_with_state(state.clone(), client_ip))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                        // 5xx responses are logged at ERROR
                        .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
                )
                .layer(cors),
        )
}
