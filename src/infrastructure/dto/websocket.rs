//! WebSocket message DTOs for both channels.
//!
//! The chat channel speaks tagged JSON events in both directions; the
//! notification channel is outbound-only. These shapes are the wire
//! contract, kept apart from the domain types on purpose.

use serde::{Deserialize, Serialize};

/// Inbound events on the chat channel, tagged by `event`.
///
/// The explicit event-name-to-variant mapping here (plus the `match` at the
/// dispatch site) replaces framework-managed event subscription.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ChatClientEvent {
    JoinRoom { room: String },
    LeaveRoom { room: String },
    Message { room: String, message: String },
}

/// Outbound events on the chat channel, tagged by `event` with the payload
/// under `data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ChatServerEvent {
    /// Direct acknowledgment carrying the assigned connection id.
    Connected(String),
    /// Join confirmation (to the joiner) or join notice (to other members).
    Joined(String),
    /// Leave confirmation or leave notice.
    Left(String),
    /// A chat message relayed to every member of the room, sender included.
    Reply(ReplyPayload),
    /// Structured error for malformed input; sent to the offender only.
    Error(ErrorPayload),
}

/// Payload of a `reply` event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyPayload {
    pub id: String,
    pub message: ReplyBody,
    pub room: String,
}

/// Nested message body of a `reply` event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyBody {
    pub message: String,
}

/// Payload of an `error` event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
}

/// Packet type marker on the notification channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationType {
    Notification,
}

/// Outbound packet on the notification channel.
///
/// `room` is present only for room-scoped pushes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationMessage {
    pub r#type: NotificationType,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}
