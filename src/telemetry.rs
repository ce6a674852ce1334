//! Structured logging setup.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Default filter for the command-line and API front ends.
pub const DEFAULT_FILTER: &str = "info,tower=warn,hyper=warn";

/// Filter used while the terminal dashboard owns the screen.
pub const QUIET_FILTER: &str = "error";

/// Installs the global subscriber, writing to stderr.
///
/// `RUST_LOG` overrides `default_filter`. Calling this twice is a no-op.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
