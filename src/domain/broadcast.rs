//! Broadcast seam between the relays and the transport.
//!
//! The relays compose and address packets; the transport owns the sockets
//! and performs the actual fan-out, including the room-membership lookup
//! for room-scoped broadcasts. Keeping the trait in the domain layer lets
//! the usecase layer depend on it without knowing the transport (and lets
//! tests mock it).

use async_trait::async_trait;

use super::value_object::{ConnectionId, RoomName};

/// The two independent logical channels a client can hold against the
/// server. Chat traffic and notifications never share a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Chat,
    Notification,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::Chat => write!(f, "chat"),
            Channel::Notification => write!(f, "notification"),
        }
    }
}

/// Fire-and-forget delivery primitive.
///
/// Every send is one-shot: no acknowledgment, no retry, no failure
/// propagation back to the caller. A slow or dead peer's send is dropped by
/// the transport rather than blocking others.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Broadcast: Send + Sync {
    /// Deliver `payload` to a single connection on `channel`.
    async fn send_to(&self, channel: Channel, id: &ConnectionId, payload: String);

    /// Deliver `payload` to every connection currently present on `channel`,
    /// regardless of room membership.
    async fn broadcast_all(&self, channel: Channel, payload: String);

    /// Deliver `payload` to the members of `room` present on `channel`.
    /// Membership is snapshotted at dispatch time.
    async fn broadcast_room(&self, channel: Channel, room: &RoomName, payload: String);

    /// Like [`Broadcast::broadcast_room`], but skipping one connection
    /// (the join/leave notices that go to every *other* member).
    async fn broadcast_room_except(
        &self,
        channel: Channel,
        room: &RoomName,
        except: &ConnectionId,
        payload: String,
    );
}
