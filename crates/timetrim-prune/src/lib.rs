//! # timetrim-prune
//!
//! Removes service that has expired relative to a cutoff date, together with
//! everything that expiry makes unreachable, without breaking referential
//! integrity.
//!
//! ## Pipeline
//!
//! ```text
//! CutoffEvaluator ──> CascadePruner ──> DeletionApplier
//!   expired services    trips/routes/stops   stops, trips, routes, services
//!        │                   │                       │
//!        └──────── Reporter (stage events) ──────────┘
//! ```
//!
//! The first two stages read the graph through a shared borrow and produce
//! an owned [`RemovalPlan`]. Only the applier holds the graph mutably, and
//! only after the plan is complete.
//!
//! ## Example
//!
//! ```rust
//! use timetrim_core::{MemorySchedule, ServiceDate};
//!
//! let mut schedule = MemorySchedule::new();
//! let report = timetrim_prune::prune(&mut schedule, "20170101".parse::<ServiceDate>()?)?;
//! assert_eq!(report.total_removed(), 0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod apply;
pub mod cascade;
pub mod cutoff;
pub mod error;
pub mod metrics;
pub mod plan;
pub mod policy;
pub mod pruner;
pub mod report;

pub use apply::{ApplyOutcome, DeletionApplier};
pub use cascade::{CascadePruner, CascadeSets};
pub use cutoff::CutoffEvaluator;
pub use error::{NotFoundWarning, PruneError, Result};
pub use plan::RemovalPlan;
pub use policy::PrunePolicy;
pub use pruner::{EntityReport, PruneReport, Pruner, prune};
pub use report::{EntitySummary, NoopReporter, Reporter, Stage, StageEvent, TracingReporter};
