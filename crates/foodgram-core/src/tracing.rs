use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured stdout tracing. Call once at startup.
///
/// JSON output; the filter comes from `RUST_LOG`, falling back to `default_filter`
/// (e.g. `"info,tower_http=debug"`) when unset or unparsable.
/// Subsequent calls are silently ignored.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json())
        .try_init();
}
