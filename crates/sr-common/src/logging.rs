//! Logging setup for the relay processes.
//!
//! Two env vars control output:
//! - `LOG_FORMAT=json` switches to JSON lines for log aggregation; anything
//!   else gives human-readable text.
//! - `RUST_LOG` filters as usual (default `info`), e.g.
//!   `RUST_LOG=sr_notify=debug,tower_http=info` to watch RMS retries.

use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Install the global subscriber. Call once at process start.
pub fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(env_filter);

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }
}
