//! WebSocket connection handlers for the chat and notification channels.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::{
    domain::{Channel, ConnectionId, MessageContent, RoomName},
    infrastructure::dto::websocket::ChatClientEvent,
    ui::state::AppState,
    usecase::ChatRelay,
};

/// Query parameters for a notification-channel connection.
///
/// `peer` carries the id the client was assigned on its chat channel, so
/// room-scoped notifications can reach this socket. Without it the socket
/// gets a fresh id and is reachable by all-client pushes only.
#[derive(Debug, Deserialize)]
pub struct NotificationConnectQuery {
    pub peer: Option<String>,
}

pub async fn chat_ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let connection_id = ConnectionId::generate();
    ws.on_upgrade(move |socket| handle_chat_socket(socket, state, connection_id))
}

pub async fn notification_ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<NotificationConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let connection_id = match query.peer {
        Some(peer) => match ConnectionId::try_from(peer) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!("invalid peer id on notification connect: {}", e);
                return Err(StatusCode::BAD_REQUEST);
            }
        },
        None => ConnectionId::generate(),
    };
    Ok(ws.on_upgrade(move |socket| handle_notification_socket(socket, state, connection_id)))
}

async fn handle_chat_socket(socket: WebSocket, state: Arc<AppState>, connection_id: ConnectionId) {
    let (mut sender, mut receiver) = socket.split();

    // Channel the transport uses to reach this client.
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    state
        .transport
        .attach(Channel::Chat, connection_id.clone(), tx)
        .await;
    state.chat_relay.handle_connect(&connection_id).await;

    // Forward relayed packets onto the wire.
    let mut send_task = tokio::spawn(async move {
        while let Some(payload) = rx.recv().await {
            if sender.send(Message::Text(payload.into())).await.is_err() {
                break;
            }
        }
    });

    // Dispatch inbound events to the relay.
    let relay = state.chat_relay.clone();
    let recv_id = connection_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            let msg = match result {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::debug!("websocket error for '{}': {}", recv_id, e);
                    break;
                }
            };
            match msg {
                Message::Text(text) => dispatch_chat_event(&relay, &recv_id, text.as_str()).await,
                Message::Close(_) => {
                    tracing::debug!("client '{}' requested close", recv_id);
                    break;
                }
                // Ping/pong is handled by the protocol layer.
                _ => {}
            }
        }
    });

    // If either half finishes, tear down the other.
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Unregister before detaching so no later broadcast snapshot can still
    // contain this connection.
    state.chat_relay.handle_disconnect(&connection_id).await;
    state
        .transport
        .detach(Channel::Chat, &connection_id)
        .await;
}

/// Explicit mapping from wire event to relay handler.
async fn dispatch_chat_event(relay: &ChatRelay, id: &ConnectionId, raw: &str) {
    let event = match serde_json::from_str::<ChatClientEvent>(raw) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("unparseable chat event from '{}': {}", id, e);
            relay.report_error(id, &format!("unrecognized event: {}", e)).await;
            return;
        }
    };

    match event {
        ChatClientEvent::JoinRoom { room } => match RoomName::try_from(room) {
            Ok(room) => relay.handle_join(id, &room).await,
            Err(e) => relay.report_error(id, &e.to_string()).await,
        },
        ChatClientEvent::LeaveRoom { room } => match RoomName::try_from(room) {
            Ok(room) => relay.handle_leave(id, &room).await,
            Err(e) => relay.report_error(id, &e.to_string()).await,
        },
        ChatClientEvent::Message { room, message } => {
            match (RoomName::try_from(room), MessageContent::try_from(message)) {
                (Ok(room), Ok(content)) => relay.handle_message(id, &room, &content).await,
                (Err(e), _) | (_, Err(e)) => relay.report_error(id, &e.to_string()).await,
            }
        }
    }
}

async fn handle_notification_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    connection_id: ConnectionId,
) {
    let (mut sender, mut receiver) = socket.split();

    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    state
        .transport
        .attach(Channel::Notification, connection_id.clone(), tx)
        .await;
    tracing::info!("notification client connected: {}", connection_id);

    let mut send_task = tokio::spawn(async move {
        while let Some(payload) = rx.recv().await {
            if sender.send(Message::Text(payload.into())).await.is_err() {
                break;
            }
        }
    });

    // The notification channel is outbound-only; drain inbound frames until
    // the peer goes away.
    let drain_id = connection_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(Message::Close(_)) | Err(_) => break,
                Ok(other) => {
                    tracing::debug!("ignoring inbound frame from '{}': {:?}", drain_id, other);
                }
            }
        }
    });

    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state
        .transport
        .detach(Channel::Notification, &connection_id)
        .await;
    tracing::info!("notification client disconnected: {}", connection_id);
}
