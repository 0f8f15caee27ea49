//! Request handlers for the ui layer.

pub mod http;
pub mod websocket;

pub use http::{health_check, post_notification};
pub use websocket::{chat_ws_handler, notification_ws_handler};
