//! Logging configuration for the interactive console.
//!
//! Diagnostics go to stderr so they never interleave with command output on
//! stdout. Set `DEBUG_LOGGING=1` to enable debug output for volley crates.

use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Initialize stderr logging.
///
/// INFO+ level by default, DEBUG+ for volley crates when `DEBUG_LOGGING=1`.
pub fn init() {
    let debug_logging = std::env::var("DEBUG_LOGGING").is_ok();

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    let filter_directive = if debug_logging {
        "info,volley_core=debug,volley_cli=debug"
    } else {
        "info"
    };

    let filter = EnvFilter::new(filter_directive);

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(filter)
        .init();

    tracing::debug!(debug_logging, "Logging initialized");
}
