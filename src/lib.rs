//! Chat and notification relay server.
//!
//! Relays short text messages between connected clients grouped into named
//! rooms, and pushes out-of-band notifications either to every connected
//! client or to the members of one room. Clients hold two independent
//! WebSocket channels against the server (chat and notification); an HTTP
//! endpoint triggers the all-clients notification broadcast.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logger;
pub mod server;
pub mod ui;
pub mod usecase;

// Re-export entry point
pub use server::run_server;
