//! Infrastructure layer: the WebSocket transport and the wire DTOs.

pub mod dto;
pub mod transport;

pub use transport::WsTransport;
