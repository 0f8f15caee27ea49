//! Usecase layer: the two broadcast relays.
//!
//! Both relays are stateless request/response operations. The chat relay
//! mutates the shared registry and fans chat traffic out to rooms; the
//! notification relay composes and addresses notification packets without
//! ever reading the registry.

pub mod chat_relay;
pub mod notification_relay;

pub use chat_relay::ChatRelay;
pub use notification_relay::NotificationRelay;

use serde::Serialize;

/// Serialize an outbound packet, logging and swallowing the (practically
/// unreachable) failure. A packet that cannot be encoded is simply not sent;
/// no relay error ever propagates to the transport layer.
pub(crate) fn encode<T: Serialize>(packet: &T) -> Option<String> {
    match serde_json::to_string(packet) {
        Ok(json) => Some(json),
        Err(e) => {
            tracing::error!("failed to serialize outbound packet: {}", e);
            None
        }
    }
}
