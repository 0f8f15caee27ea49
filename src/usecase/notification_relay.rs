//! Notification relay.
//!
//! Pushes out-of-band text either to every connection on the notification
//! channel or to the members of one room. Addressing goes through the
//! transport; the relay itself holds no state and performs no membership
//! validation, trusting its caller to supply a sensible room.

use std::sync::Arc;

use crate::domain::{Broadcast, Channel, RoomName};
use crate::infrastructure::dto::websocket::{NotificationMessage, NotificationType};

use super::encode;

pub struct NotificationRelay {
    transport: Arc<dyn Broadcast>,
}

impl NotificationRelay {
    pub fn new(transport: Arc<dyn Broadcast>) -> Self {
        Self { transport }
    }

    /// Deliver `message` to every connection currently present on the
    /// notification channel, regardless of chat-room membership.
    pub async fn send_to_all(&self, message: &str) {
        tracing::info!("sending notification to all: {}", message);
        let packet = NotificationMessage {
            r#type: NotificationType::Notification,
            message: message.to_string(),
            room: None,
        };
        let Some(payload) = encode(&packet) else {
            return;
        };
        self.transport
            .broadcast_all(Channel::Notification, payload)
            .await;
    }

    /// Deliver `message` to the notification-channel connections associated
    /// with `room`.
    pub async fn send_to_room(&self, room: &RoomName, message: &str) {
        tracing::info!("sending notification to room {}: {}", room, message);
        let packet = NotificationMessage {
            r#type: NotificationType::Notification,
            message: message.to_string(),
            room: Some(room.to_string()),
        };
        let Some(payload) = encode(&packet) else {
            return;
        };
        self.transport
            .broadcast_room(Channel::Notification, room, payload)
            .await;
    }
}
