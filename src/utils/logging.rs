//! Console logging setup for host-side tools
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the binary. `RUST_LOG` overrides the default level.

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Install a stderr subscriber.
///
/// Defaults to `info`, or `debug` when `debug` is set. Calling this twice
/// returns an error from the second call.
pub fn init_logging(debug: bool) -> Result<(), tracing_subscriber::util::TryInitError> {
    let default_level = if debug { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init()
}
