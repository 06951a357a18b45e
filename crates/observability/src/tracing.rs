//! Tracing/logging initialization.
//!
//! Authorization denials are logged as events on the handler spans, so the
//! subscriber set up here is the audit trail for the portal.

use tracing_subscriber::EnvFilter;

// Keep sqlx statement logging out of the default stream; RUST_LOG
// overrides this wholesale.
const DEFAULT_FILTER: &str = "info,sqlx=warn";

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
