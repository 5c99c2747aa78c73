pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::biography::handlers;
use crate::state::AppState;
use crate::translation;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/biography/document",
            post(handlers::handle_generate_document),
        )
        .route(
            "/api/v1/biography/sections",
            post(handlers::handle_generate_sections),
        )
        .route("/api/v1/translation", post(translation::handle_translate))
        .with_state(state)
}
