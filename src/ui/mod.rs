//! UI layer: router assembly and connection handling.

mod handler;
pub mod state;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the application router.
///
/// `GET /chat` and `GET /notification` upgrade to the two WebSocket
/// channels; `POST /notification` is the HTTP notification trigger.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/chat", get(handler::chat_ws_handler))
        .route(
            "/notification",
            get(handler::notification_ws_handler).post(handler::post_notification),
        )
        .route("/api/health", get(handler::health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
