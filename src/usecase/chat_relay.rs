//! Chat relay.
//!
//! Consumes connect/join/leave/message/disconnect events from one
//! connection, mutates the shared registry, and broadcasts chat traffic to
//! room members. On every chat message it also triggers a room-scoped
//! notification push; that call is fire-and-forget and never affects the
//! chat broadcast itself.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{
    Broadcast, Channel, ConnectionId, ConnectionRegistry, MessageContent, RoomName,
};
use crate::infrastructure::dto::websocket::{
    ChatServerEvent, ErrorPayload, ReplyBody, ReplyPayload,
};

use super::{NotificationRelay, encode};

pub struct ChatRelay {
    registry: Arc<Mutex<ConnectionRegistry>>,
    transport: Arc<dyn Broadcast>,
    notifications: Arc<NotificationRelay>,
}

impl ChatRelay {
    pub fn new(
        registry: Arc<Mutex<ConnectionRegistry>>,
        transport: Arc<dyn Broadcast>,
        notifications: Arc<NotificationRelay>,
    ) -> Self {
        Self {
            registry,
            transport,
            notifications,
        }
    }

    /// Register the connection and acknowledge it with its assigned id.
    pub async fn handle_connect(&self, id: &ConnectionId) {
        {
            let mut registry = self.registry.lock().await;
            registry.register(id.clone());
        }
        tracing::info!("client connected: {}", id);
        self.send_event(id, &ChatServerEvent::Connected(format!("Connected with ID: {}", id)))
            .await;
    }

    /// Join `room`, confirm to the joiner, and notify the other members.
    ///
    /// The confirmation to the joiner goes out before the notice to others.
    /// The notice is emitted only when membership actually changed; a
    /// repeated join re-acknowledges the joiner but stays silent for the
    /// rest of the room.
    pub async fn handle_join(&self, id: &ConnectionId, room: &RoomName) {
        let changed = {
            let mut registry = self.registry.lock().await;
            registry.join(id, room.clone())
        };
        match changed {
            Ok(changed) => {
                tracing::info!("client {} joined room: {}", id, room);
                self.send_event(id, &ChatServerEvent::Joined(format!("You joined room: {}", room)))
                    .await;
                if changed {
                    self.broadcast_event_except(
                        room,
                        id,
                        &ChatServerEvent::Joined(format!("User {} joined room: {}", id, room)),
                    )
                    .await;
                } else {
                    tracing::debug!("client {} already a member of {}", id, room);
                }
            }
            Err(e) => {
                tracing::warn!("join failed for {}: {}", id, e);
                self.report_error(id, &e.to_string()).await;
            }
        }
    }

    /// Leave `room`, confirm to the leaver, and notify the remaining
    /// members. As with join, the notice fires only on an actual state
    /// change.
    pub async fn handle_leave(&self, id: &ConnectionId, room: &RoomName) {
        let was_member = {
            let mut registry = self.registry.lock().await;
            registry.leave(id, room)
        };
        match was_member {
            Ok(was_member) => {
                tracing::info!("client {} left room: {}", id, room);
                self.send_event(id, &ChatServerEvent::Left(format!("You left room: {}", room)))
                    .await;
                if was_member {
                    self.broadcast_event_except(
                        room,
                        id,
                        &ChatServerEvent::Left(format!("User {} left room: {}", id, room)),
                    )
                    .await;
                }
            }
            Err(e) => {
                tracing::warn!("leave failed for {}: {}", id, e);
                self.report_error(id, &e.to_string()).await;
            }
        }
    }

    /// Broadcast a reply packet to every current member of `room`, sender
    /// included, then trigger the room-scoped notification push.
    pub async fn handle_message(&self, id: &ConnectionId, room: &RoomName, content: &MessageContent) {
        tracing::info!("message from {} to room {}", id, room);
        let reply = ChatServerEvent::Reply(ReplyPayload {
            id: id.to_string(),
            message: ReplyBody {
                message: content.to_string(),
            },
            room: room.to_string(),
        });
        if let Some(payload) = encode(&reply) {
            self.transport
                .broadcast_room(Channel::Chat, room, payload)
                .await;
        }

        // Fire-and-forget; a notification failure never aborts the chat
        // broadcast above.
        self.notifications
            .send_to_room(room, &format!("New message in {}", room))
            .await;
    }

    /// Unregister the connection. Departure is silent; no broadcast goes to
    /// the rooms it belonged to.
    pub async fn handle_disconnect(&self, id: &ConnectionId) {
        let was_present = {
            let mut registry = self.registry.lock().await;
            registry.unregister(id)
        };
        if was_present {
            tracing::info!("client disconnected: {}", id);
        } else {
            tracing::debug!("disconnect for unknown client: {}", id);
        }
    }

    /// Send a structured error event to the offending connection only.
    /// One client's bad input never reaches anyone else's session.
    pub async fn report_error(&self, id: &ConnectionId, detail: &str) {
        self.send_event(
            id,
            &ChatServerEvent::Error(ErrorPayload {
                message: detail.to_string(),
            }),
        )
        .await;
    }

    async fn send_event(&self, id: &ConnectionId, event: &ChatServerEvent) {
        if let Some(payload) = encode(event) {
            self.transport.send_to(Channel::Chat, id, payload).await;
        }
    }

    async fn broadcast_event_except(
        &self,
        room: &RoomName,
        except: &ConnectionId,
        event: &ChatServerEvent,
    ) {
        if let Some(payload) = encode(event) {
            self.transport
                .broadcast_room_except(Channel::Chat, room, except, payload)
                .await;
        }
    }
}
