//! # timetrim-core
//!
//! Core abstractions for timetrim, a tool that removes expired service from
//! transit schedules.
//!
//! This crate provides the foundational types and traits used by the prune
//! engine and the command-line tool:
//!
//! - **Identifiers**: Strongly-typed ids for service periods, trips, routes, stops
//! - **Dates**: [`ServiceDate`], the `YYYYMMDD` calendar date
//! - **Schedule Graph**: Read and removal capability traits over the entity graph
//! - **Memory Store**: [`MemorySchedule`], an indexed in-memory graph
//! - **Snapshots**: JSON load/save of a whole schedule
//! - **Integrity**: Dangling-reference detection
//!
//! ## Example
//!
//! ```rust
//! use timetrim_core::prelude::*;
//!
//! let mut schedule = MemorySchedule::new();
//! schedule.insert_route(Route::new(RouteId::new("R1")?));
//! assert_eq!(schedule.counts().routes, 1);
//! assert!(schedule.remove_route(&RouteId::new("R1")?));
//! # Ok::<(), timetrim_core::Error>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod date;
pub mod error;
pub mod graph;
pub mod id;
pub mod inspect;
pub mod integrity;
pub mod memory;
pub mod model;
pub mod observability;
pub mod snapshot;

pub use date::ServiceDate;
pub use error::{Error, Result};
pub use graph::{EntityCounts, ScheduleGraph, ScheduleGraphMut};
pub use id::{RouteId, ServiceId, StopId, TripId};
pub use integrity::IntegrityViolation;
pub use memory::MemorySchedule;
pub use model::{EntityKind, Route, ServicePeriod, Stop, StopTime, Trip};
pub use snapshot::ScheduleSnapshot;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::date::ServiceDate;
    pub use crate::error::{Error, Result};
    pub use crate::graph::{EntityCounts, ScheduleGraph, ScheduleGraphMut};
    pub use crate::id::{RouteId, ServiceId, StopId, TripId};
    pub use crate::memory::MemorySchedule;
    pub use crate::model::{EntityKind, Route, ServicePeriod, Stop, StopTime, Trip};
    pub use crate::snapshot::ScheduleSnapshot;
}
