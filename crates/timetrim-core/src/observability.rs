//! Observability infrastructure for timetrim.
//!
//! Initialization helpers and span constructors so that every binary and
//! test logs with the same structure.

use std::sync::Once;
use tracing::Span;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON structured logs (for automation).
    Json,
    /// Pretty-printed logs (for people).
    #[default]
    Pretty,
}

/// Initializes the logging subsystem.
///
/// Call once at application startup. Safe to call multiple times;
/// subsequent calls are no-ops. Logs go to stderr so that command output on
/// stdout stays machine readable.
///
/// # Environment Variables
///
/// - `RUST_LOG`: Controls log levels (e.g., `info`, `timetrim_prune=debug`).
///   Falls back to `default_filter` when unset.
///
/// # Example
///
/// ```rust
/// use timetrim_core::observability::{init_logging, LogFormat};
///
/// init_logging(LogFormat::Pretty, "info");
/// ```
pub fn init_logging(format: LogFormat, default_filter: &str) {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

        match format {
            LogFormat::Json => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt::layer().json().with_writer(std::io::stderr))
                    .init();
            }
            LogFormat::Pretty => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
                    .init();
            }
        }
    });
}

/// Creates a span for prune operations with standard fields.
///
/// # Example
///
/// ```rust
/// use timetrim_core::observability::prune_span;
///
/// let span = prune_span("prune", "20170101");
/// let _guard = span.enter();
/// ```
#[must_use]
pub fn prune_span(operation: &str, cutoff: &str) -> Span {
    tracing::info_span!("prune", op = operation, cutoff = cutoff)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_logging_is_idempotent() {
        init_logging(LogFormat::Pretty, "warn");
        init_logging(LogFormat::Json, "warn");
    }

    #[test]
    fn span_helper_creates_span() {
        let span = prune_span("test_operation", "20170101");
        let _guard = span.enter();
        tracing::info!("test message in span");
    }
}
