//! WebSocket transport: the owned fan-out object behind the relays.
//!
//! Each connected socket is represented by an unbounded mpsc sender; a
//! per-socket forward task drains the receiving end onto the wire. The
//! transport keeps one peer map per channel and implements the domain's
//! [`Broadcast`] seam on top of them. Room-scoped broadcasts snapshot
//! membership from the shared registry before fanning out, so a connection
//! mid-teardown is either absent from the snapshot or its send fails fast
//! and is dropped.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc::UnboundedSender};

use crate::domain::{Broadcast, Channel, ConnectionId, ConnectionRegistry, RoomName};

/// Peer maps, one per logical channel.
#[derive(Debug, Default)]
struct Peers {
    chat: HashMap<ConnectionId, UnboundedSender<String>>,
    notification: HashMap<ConnectionId, UnboundedSender<String>>,
}

impl Peers {
    fn on(&self, channel: Channel) -> &HashMap<ConnectionId, UnboundedSender<String>> {
        match channel {
            Channel::Chat => &self.chat,
            Channel::Notification => &self.notification,
        }
    }

    fn on_mut(&mut self, channel: Channel) -> &mut HashMap<ConnectionId, UnboundedSender<String>> {
        match channel {
            Channel::Chat => &mut self.chat,
            Channel::Notification => &mut self.notification,
        }
    }
}

/// Transport over live WebSocket connections.
///
/// Lock order is registry before peers; the registry lock is always released
/// before the peer lock is taken.
pub struct WsTransport {
    registry: Arc<Mutex<ConnectionRegistry>>,
    peers: Mutex<Peers>,
}

impl WsTransport {
    pub fn new(registry: Arc<Mutex<ConnectionRegistry>>) -> Self {
        Self {
            registry,
            peers: Mutex::new(Peers::default()),
        }
    }

    /// Attach a peer's sender to `channel`. Called by the socket handler
    /// right after the upgrade, before any relay event for the connection.
    pub async fn attach(&self, channel: Channel, id: ConnectionId, sender: UnboundedSender<String>) {
        let mut peers = self.peers.lock().await;
        if peers.on_mut(channel).insert(id.clone(), sender).is_some() {
            tracing::warn!("replaced existing {} peer for '{}'", channel, id);
        }
    }

    /// Detach a peer from `channel`. Once removed, no broadcast snapshot can
    /// deliver to it.
    pub async fn detach(&self, channel: Channel, id: &ConnectionId) {
        let mut peers = self.peers.lock().await;
        peers.on_mut(channel).remove(id);
    }

    /// Number of peers currently attached on `channel`.
    pub async fn peer_count(&self, channel: Channel) -> usize {
        let peers = self.peers.lock().await;
        peers.on(channel).len()
    }

    fn deliver(id: &ConnectionId, sender: &UnboundedSender<String>, payload: String) {
        // One-shot send; a closed channel means the peer is mid-teardown.
        if sender.send(payload).is_err() {
            tracing::debug!("dropping send to disconnected peer '{}'", id);
        }
    }
}

#[async_trait]
impl Broadcast for WsTransport {
    async fn send_to(&self, channel: Channel, id: &ConnectionId, payload: String) {
        let peers = self.peers.lock().await;
        match peers.on(channel).get(id) {
            Some(sender) => Self::deliver(id, sender, payload),
            None => tracing::debug!("no {} peer for '{}'", channel, id),
        }
    }

    async fn broadcast_all(&self, channel: Channel, payload: String) {
        let peers = self.peers.lock().await;
        for (id, sender) in peers.on(channel) {
            Self::deliver(id, sender, payload.clone());
        }
    }

    async fn broadcast_room(&self, channel: Channel, room: &RoomName, payload: String) {
        let members = {
            let registry = self.registry.lock().await;
            registry.members_of(room)
        };
        if members.is_empty() {
            // Empty target is not an error; the broadcast is a no-op.
            return;
        }
        let peers = self.peers.lock().await;
        for id in &members {
            if let Some(sender) = peers.on(channel).get(id) {
                Self::deliver(id, sender, payload.clone());
            }
        }
    }

    async fn broadcast_room_except(
        &self,
        channel: Channel,
        room: &RoomName,
        except: &ConnectionId,
        payload: String,
    ) {
        let members = {
            let registry = self.registry.lock().await;
            registry.members_of(room)
        };
        let peers = self.peers.lock().await;
        for id in members.iter().filter(|id| *id != except) {
            if let Some(sender) = peers.on(channel).get(id) {
                Self::deliver(id, sender, payload.clone());
            }
        }
    }
}
