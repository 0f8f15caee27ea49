//! Server entry point: wiring and the listen loop.

use crate::config::ServerConfig;
use crate::ui::{self, state::AppState};

/// Build the application state, bind, and serve until shutdown.
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    let state = AppState::build();
    let app = ui::router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install ctrl-c handler: {}", e);
        return;
    }
    tracing::info!("shutdown signal received");
}
