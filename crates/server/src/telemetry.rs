use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "todo_server=debug,server=debug,tower_http=debug";

/// Install the global tracing subscriber: an `EnvFilter` read from `RUST_LOG`
/// and a formatted stdout layer.
///
/// Returns `false` when a subscriber was already installed (for example by a
/// test harness); the existing one is left in place.
pub fn init_tracing() -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}
