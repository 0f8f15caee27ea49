//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};

use crate::{
    domain::MessageContent, infrastructure::dto::http::NotificationRequest, ui::state::AppState,
};

/// `POST /notification`: forward the body into the notification relay's
/// all-clients broadcast.
pub async fn post_notification(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NotificationRequest>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let message = match MessageContent::try_from(body.message) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!("rejecting notification request: {}", e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    state.notification_relay.send_to_all(message.as_str()).await;
    Ok(Json(serde_json::json!({"status": "ok"})))
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}
