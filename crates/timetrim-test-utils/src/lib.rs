//! Shared test utilities for timetrim integration tests.
//!
//! This crate provides:
//! - [`TracingSchedule`]: In-memory schedule with removal recording
//! - [`RecordingReporter`]: Stage event capture
//! - [`ScheduleBuilder`] and [`ScheduleFactory`] for test data
//! - Custom assertion helpers
//!
//! # Example
//!
//! ```rust,ignore
//! use timetrim_test_utils::{ScheduleFactory, RecordingReporter, date};
//!
//! #[test]
//! fn test_example() {
//!     let mut schedule = ScheduleFactory::canonical();
//!     let mut reporter = RecordingReporter::new();
//!     // ... run prune ...
//! }
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
// Test utilities use expect/unwrap for cleaner test code - panics are acceptable in tests
#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::missing_panics_doc)]

pub mod assertions;
pub mod fixtures;
pub mod graph;
pub mod reporter;

pub use assertions::*;
pub use fixtures::*;
pub use graph::*;
pub use reporter::*;

/// Initialize test logging (call once per test module).
pub fn init_test_logging() {
    use tracing_subscriber::{EnvFilter, fmt};

    let _ = fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("timetrim_prune=debug".parse().expect("valid directive")),
        )
        .with_test_writer()
        .try_init();
}
