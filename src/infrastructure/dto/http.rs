//! HTTP API request DTOs.

use serde::{Deserialize, Serialize};

/// Body of `POST /notification`: a text to push to every client currently
/// connected on the notification channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub message: String,
}
