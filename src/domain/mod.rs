//! Domain layer for the relay.
//!
//! Business state and rules, independent of data transfer objects and
//! infrastructure concerns: the connection/room registry, the value objects
//! the relays operate on, and the broadcast seam the transport implements.

pub mod broadcast;
pub mod entity;
pub mod error;
pub mod value_object;

pub use broadcast::{Broadcast, Channel};
pub use entity::{Connection, ConnectionRegistry};
pub use error::{RegistryError, ValueObjectError};
pub use value_object::{ConnectionId, MessageContent, RoomName};

#[cfg(test)]
pub use broadcast::MockBroadcast;
