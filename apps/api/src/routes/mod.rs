pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::chat::handlers;
use crate::errors::AppError;
use crate::state::AppState;

async fn route_not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_handler))
        .route("/api/chat", post(handlers::handle_chat))
        .route("/api/chat/status", get(handlers::handle_chat_status))
        .route(
            "/api/chat/next-question",
            post(handlers::handle_next_question),
        )
        .fallback(route_not_found)
        .with_state(state)
}
