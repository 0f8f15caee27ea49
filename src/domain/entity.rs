//! Connection registry entity.
//!
//! Tracks every live connection and the set of rooms it currently belongs
//! to. Rooms have no storage of their own: a room is exactly the set of
//! connections whose membership contains its name, so there is no separate
//! room table to go stale.

use std::collections::{HashMap, HashSet};

use super::error::RegistryError;
use super::value_object::{ConnectionId, RoomName};

/// One live connection and its current room memberships.
#[derive(Debug, Clone)]
pub struct Connection {
    id: ConnectionId,
    rooms: HashSet<RoomName>,
}

impl Connection {
    fn new(id: ConnectionId) -> Self {
        Self {
            id,
            rooms: HashSet::new(),
        }
    }

    pub fn id(&self) -> &ConnectionId {
        &self.id
    }

    /// Rooms this connection currently belongs to.
    pub fn rooms(&self) -> &HashSet<RoomName> {
        &self.rooms
    }

    pub fn is_member(&self, room: &RoomName) -> bool {
        self.rooms.contains(room)
    }
}

/// Registry of live connections and their room memberships.
///
/// The only stateful component of the relay. Mutated exclusively by the
/// chat relay's event handlers; read by the transport when it snapshots a
/// room's members for a broadcast.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: HashMap<ConnectionId, Connection>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new, room-less connection. Idempotent; re-registering an
    /// existing id leaves its memberships untouched.
    pub fn register(&mut self, id: ConnectionId) {
        self.connections
            .entry(id.clone())
            .or_insert_with(|| Connection::new(id));
    }

    /// Add `room` to the connection's membership set.
    ///
    /// Returns `Ok(true)` if membership actually changed, `Ok(false)` if the
    /// connection was already a member (idempotent join, not additive).
    pub fn join(&mut self, id: &ConnectionId, room: RoomName) -> Result<bool, RegistryError> {
        let connection = self
            .connections
            .get_mut(id)
            .ok_or_else(|| RegistryError::UnknownConnection(id.clone()))?;
        Ok(connection.rooms.insert(room))
    }

    /// Remove `room` from the connection's membership set.
    ///
    /// Returns `Ok(true)` if the connection actually was a member.
    pub fn leave(&mut self, id: &ConnectionId, room: &RoomName) -> Result<bool, RegistryError> {
        let connection = self
            .connections
            .get_mut(id)
            .ok_or_else(|| RegistryError::UnknownConnection(id.clone()))?;
        Ok(connection.rooms.remove(room))
    }

    /// Clear all memberships and remove the connection. Invoked exactly once,
    /// on transport disconnect. Returns whether the connection was present.
    pub fn unregister(&mut self, id: &ConnectionId) -> bool {
        self.connections.remove(id).is_some()
    }

    /// Snapshot of the connections whose membership currently contains `room`.
    pub fn members_of(&self, room: &RoomName) -> Vec<ConnectionId> {
        self.connections
            .values()
            .filter(|connection| connection.is_member(room))
            .map(|connection| connection.id.clone())
            .collect()
    }

    /// Look up a live connection by id.
    pub fn get(&self, id: &ConnectionId) -> Option<&Connection> {
        self.connections.get(id)
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.connections.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}
