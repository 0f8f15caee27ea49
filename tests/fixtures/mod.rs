//! Shared test fixtures: an in-process server plus WebSocket client helpers.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use roomcast::ui::{router, state::AppState};

pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// A relay server bound to an ephemeral port, torn down on drop.
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        let state = AppState::build();
        let app = router(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server failed");
        });
        Self { addr, handle }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn chat_url(&self) -> String {
        format!("ws://{}/chat", self.addr)
    }

    pub fn notification_url(&self) -> String {
        format!("ws://{}/notification", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Open a chat-channel socket and return it together with the connection id
/// announced in the `connected` acknowledgment.
pub async fn connect_chat(server: &TestServer) -> (WsStream, String) {
    let (mut ws, _) = connect_async(server.chat_url())
        .await
        .expect("Failed to connect chat channel");
    let ack = recv_json(&mut ws).await;
    assert_eq!(ack["event"], "connected");
    let data = ack["data"].as_str().expect("connected data should be a string");
    let id = data
        .strip_prefix("Connected with ID: ")
        .expect("unexpected connected ack format")
        .to_string();
    (ws, id)
}

/// Open a notification-channel socket, optionally bound to an existing chat
/// connection id so room-scoped pushes reach it.
pub async fn connect_notifications(server: &TestServer, peer: Option<&str>) -> WsStream {
    let url = match peer {
        Some(peer) => format!("{}?peer={}", server.notification_url(), peer),
        None => server.notification_url(),
    };
    let (ws, _) = connect_async(url)
        .await
        .expect("Failed to connect notification channel");
    // The handshake completes before the server attaches the peer; give the
    // upgrade task a moment so broadcasts sent right away still reach us.
    tokio::time::sleep(Duration::from_millis(100)).await;
    ws
}

pub async fn send_json(ws: &mut WsStream, value: &serde_json::Value) {
    ws.send(Message::text(value.to_string()))
        .await
        .expect("Failed to send websocket message");
}

/// Receive the next text frame as JSON, waiting up to two seconds.
pub async fn recv_json(ws: &mut WsStream) -> serde_json::Value {
    loop {
        let frame = tokio::time::timeout(Duration::from_secs(2), ws.next())
            .await
            .expect("Timed out waiting for websocket event")
            .expect("Websocket closed while waiting for event")
            .expect("Websocket error while waiting for event");
        if let Message::Text(text) = frame {
            return serde_json::from_str(text.as_str()).expect("Received non-JSON text frame");
        }
    }
}

/// Try to receive a text frame within a short window; `None` means silence.
pub async fn try_recv_json(ws: &mut WsStream) -> Option<serde_json::Value> {
    loop {
        match tokio::time::timeout(Duration::from_millis(300), ws.next()).await {
            Err(_) => return None,
            Ok(None) => return None,
            Ok(Some(Ok(Message::Text(text)))) => {
                return Some(serde_json::from_str(text.as_str()).expect("non-JSON text frame"));
            }
            Ok(Some(Ok(_))) => continue,
            Ok(Some(Err(_))) => return None,
        }
    }
}

/// Join `room` and consume the direct confirmation.
pub async fn join_room(ws: &mut WsStream, room: &str) {
    send_json(ws, &serde_json::json!({"event": "join-room", "room": room})).await;
    let ack = recv_json(ws).await;
    assert_eq!(ack["event"], "joined");
    assert_eq!(ack["data"], format!("You joined room: {}", room));
}

pub async fn send_message(ws: &mut WsStream, room: &str, message: &str) {
    send_json(
        ws,
        &serde_json::json!({"event": "message", "room": room, "message": message}),
    )
    .await;
}
