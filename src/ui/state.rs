//! Shared application state and wiring.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{Broadcast, ConnectionRegistry};
use crate::infrastructure::WsTransport;
use crate::usecase::{ChatRelay, NotificationRelay};

/// Shared application state handed to every handler.
pub struct AppState {
    /// The owned transport; handlers attach and detach peers on it.
    pub transport: Arc<WsTransport>,
    pub chat_relay: Arc<ChatRelay>,
    pub notification_relay: Arc<NotificationRelay>,
}

impl AppState {
    /// Wire up the components in dependency order: registry, then transport,
    /// then the notification relay (no dependencies besides the transport),
    /// then the chat relay holding the notification relay. No globals.
    pub fn build() -> Arc<Self> {
        let registry = Arc::new(Mutex::new(ConnectionRegistry::new()));
        let transport = Arc::new(WsTransport::new(registry.clone()));
        let broadcast: Arc<dyn Broadcast> = transport.clone();
        let notification_relay = Arc::new(NotificationRelay::new(broadcast.clone()));
        let chat_relay = Arc::new(ChatRelay::new(
            registry,
            broadcast,
            notification_relay.clone(),
        ));
        Arc::new(Self {
            transport,
            chat_relay,
            notification_relay,
        })
    }
}
