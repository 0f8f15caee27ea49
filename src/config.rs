//! Server configuration from the command line.

use clap::Parser;

/// Command-line configuration for the relay server.
#[derive(Debug, Clone, Parser)]
#[command(name = "roomcast-server", about = "Chat and notification relay server")]
pub struct ServerConfig {
    /// Address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 3000)]
    pub port: u16,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
