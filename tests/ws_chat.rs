//! End-to-end chat channel tests over real WebSockets.
//!
//! Drives the relay through the wire protocol: room join/leave
//! confirmations, reply fan-out, room isolation, notification pushes, and
//! the malformed-input policy.

mod fixtures;

use fixtures::{
    TestServer, connect_chat, connect_notifications, join_room, recv_json, send_json,
    send_message, try_recv_json,
};
use futures_util::SinkExt;
use serde_json::json;
use std::time::Duration;

#[tokio::test]
async fn test_connect_acknowledges_with_assigned_id() {
    let server = TestServer::start().await;

    let (_ws, id) = connect_chat(&server).await;

    assert!(!id.is_empty());
}

#[tokio::test]
async fn test_join_notifies_existing_members() {
    let server = TestServer::start().await;
    let (mut a, _a_id) = connect_chat(&server).await;
    join_room(&mut a, "general").await;

    let (mut b, b_id) = connect_chat(&server).await;
    join_room(&mut b, "general").await;

    let notice = recv_json(&mut a).await;
    assert_eq!(notice["event"], "joined");
    assert_eq!(notice["data"], format!("User {} joined room: general", b_id));
}

#[tokio::test]
async fn test_message_reaches_every_member_including_sender() {
    let server = TestServer::start().await;
    let (mut a, a_id) = connect_chat(&server).await;
    join_room(&mut a, "general").await;
    let (mut b, b_id) = connect_chat(&server).await;
    join_room(&mut b, "general").await;
    let _ = recv_json(&mut a).await; // b's join notice
    let mut na = connect_notifications(&server, Some(&a_id)).await;
    let mut nb = connect_notifications(&server, Some(&b_id)).await;

    send_message(&mut a, "general", "hi").await;

    for ws in [&mut a, &mut b] {
        let reply = recv_json(ws).await;
        assert_eq!(reply["event"], "reply");
        assert_eq!(reply["data"]["id"], a_id);
        assert_eq!(reply["data"]["message"]["message"], "hi");
        assert_eq!(reply["data"]["room"], "general");
    }
    for ws in [&mut na, &mut nb] {
        let packet = recv_json(ws).await;
        assert_eq!(packet["type"], "notification");
        assert_eq!(packet["message"], "New message in general");
        assert_eq!(packet["room"], "general");
    }
}

#[tokio::test]
async fn test_rooms_are_isolated() {
    let server = TestServer::start().await;
    let (mut a, _a_id) = connect_chat(&server).await;
    join_room(&mut a, "general").await;
    let (mut c, c_id) = connect_chat(&server).await;
    join_room(&mut c, "lobby").await;
    let mut nc = connect_notifications(&server, Some(&c_id)).await;

    send_message(&mut a, "general", "hi").await;

    // a gets its own reply; c, a member only of lobby, gets nothing on
    // either channel.
    assert_eq!(recv_json(&mut a).await["event"], "reply");
    assert!(try_recv_json(&mut c).await.is_none());
    assert!(try_recv_json(&mut nc).await.is_none());
}

#[tokio::test]
async fn test_leave_stops_delivery() {
    let server = TestServer::start().await;
    let (mut a, a_id) = connect_chat(&server).await;
    join_room(&mut a, "general").await;
    let (mut b, b_id) = connect_chat(&server).await;
    join_room(&mut b, "general").await;
    let _ = recv_json(&mut a).await; // b's join notice

    send_json(&mut a, &json!({"event": "leave-room", "room": "general"})).await;
    let ack = recv_json(&mut a).await;
    assert_eq!(ack["event"], "left");
    assert_eq!(ack["data"], "You left room: general");
    let notice = recv_json(&mut b).await;
    assert_eq!(notice["event"], "left");
    assert_eq!(notice["data"], format!("User {} left room: general", a_id));

    send_message(&mut b, "general", "yo").await;

    let reply = recv_json(&mut b).await;
    assert_eq!(reply["data"]["id"], b_id);
    assert_eq!(reply["data"]["message"]["message"], "yo");
    assert!(try_recv_json(&mut a).await.is_none());
}

#[tokio::test]
async fn test_leaving_a_room_never_joined_stays_silent_for_others() {
    let server = TestServer::start().await;
    let (mut a, _a_id) = connect_chat(&server).await;
    let (mut b, _b_id) = connect_chat(&server).await;
    join_room(&mut b, "general").await;

    send_json(&mut a, &json!({"event": "leave-room", "room": "general"})).await;

    // a is still confirmed, but the room hears nothing.
    assert_eq!(recv_json(&mut a).await["event"], "left");
    assert!(try_recv_json(&mut b).await.is_none());
}

#[tokio::test]
async fn test_repeated_join_does_not_duplicate_membership() {
    let server = TestServer::start().await;
    let (mut a, _a_id) = connect_chat(&server).await;
    join_room(&mut a, "general").await;
    let (mut b, _b_id) = connect_chat(&server).await;
    join_room(&mut b, "general").await;
    let _ = recv_json(&mut a).await; // b's join notice

    // Second join: a is re-acknowledged, b hears nothing.
    join_room(&mut a, "general").await;
    assert!(try_recv_json(&mut b).await.is_none());

    // And a still receives subsequent broadcasts exactly once.
    send_message(&mut b, "general", "ping").await;
    let reply = recv_json(&mut a).await;
    assert_eq!(reply["data"]["message"]["message"], "ping");
    assert!(try_recv_json(&mut a).await.is_none());
}

#[tokio::test]
async fn test_disconnect_is_silent_and_stops_delivery() {
    let server = TestServer::start().await;
    let (mut a, _a_id) = connect_chat(&server).await;
    join_room(&mut a, "general").await;
    let (mut b, b_id) = connect_chat(&server).await;
    join_room(&mut b, "general").await;
    let _ = recv_json(&mut a).await; // b's join notice

    drop(a);
    // Let the server observe the teardown before broadcasting.
    tokio::time::sleep(Duration::from_millis(200)).await;

    send_message(&mut b, "general", "anyone there?").await;

    // b gets its own reply and nothing else: no departure notice, no
    // delivery attempt artifacts.
    let reply = recv_json(&mut b).await;
    assert_eq!(reply["data"]["id"], b_id);
    assert!(try_recv_json(&mut b).await.is_none());
}

#[tokio::test]
async fn test_unparseable_event_yields_error_to_sender_only() {
    let server = TestServer::start().await;
    let (mut a, _a_id) = connect_chat(&server).await;
    join_room(&mut a, "general").await;
    let (mut b, _b_id) = connect_chat(&server).await;
    join_room(&mut b, "general").await;
    let _ = recv_json(&mut a).await; // b's join notice

    b.send(tokio_tungstenite::tungstenite::Message::text("this is not json"))
        .await
        .expect("Failed to send raw frame");

    let error = recv_json(&mut b).await;
    assert_eq!(error["event"], "error");
    assert!(try_recv_json(&mut a).await.is_none());
}

#[tokio::test]
async fn test_empty_room_name_is_rejected() {
    let server = TestServer::start().await;
    let (mut a, _a_id) = connect_chat(&server).await;

    send_json(&mut a, &json!({"event": "join-room", "room": "   "})).await;

    let error = recv_json(&mut a).await;
    assert_eq!(error["event"], "error");

    // The session survives bad input: a normal join still works.
    join_room(&mut a, "general").await;
}

#[tokio::test]
async fn test_empty_message_is_rejected_without_broadcast() {
    let server = TestServer::start().await;
    let (mut a, _a_id) = connect_chat(&server).await;
    join_room(&mut a, "general").await;
    let (mut b, _b_id) = connect_chat(&server).await;
    join_room(&mut b, "general").await;
    let _ = recv_json(&mut a).await; // b's join notice

    send_json(
        &mut a,
        &json!({"event": "message", "room": "general", "message": ""}),
    )
    .await;

    assert_eq!(recv_json(&mut a).await["event"], "error");
    assert!(try_recv_json(&mut b).await.is_none());
}
