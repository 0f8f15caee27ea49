//! Tracing setup.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `default_level` applies to this
/// crate and to tower-http request traces. Uses `try_init` so tests can call
/// it repeatedly without panicking.
pub fn setup_logger(name: &str, default_level: &str) {
    let directives = format!(
        "{crate_name}={level},tower_http={level}",
        crate_name = name.replace('-', "_"),
        level = default_level
    );
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
