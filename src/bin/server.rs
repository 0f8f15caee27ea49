//! Chat and notification relay server binary.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin roomcast-server
//! ```

use clap::Parser;

use roomcast::config::ServerConfig;
use roomcast::logger::setup_logger;

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);

    // Run the server
    if let Err(e) = roomcast::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
