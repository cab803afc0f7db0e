//! Schedule entities.
//!
//! The schedule graph is small: service periods are referenced by trips,
//! trips belong to a route, and stop-times join trips to stops.
//!
//! ```text
//! ServicePeriod <── Trip ──> Route
//!                    │
//!                StopTime ──> Stop
//! ```
//!
//! Route->trips and stop->trips are derived relationships; they are answered
//! by the [`ScheduleGraph`](crate::ScheduleGraph) rather than stored on the
//! entities.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::date::ServiceDate;
use crate::id::{RouteId, ServiceId, StopId, TripId};

/// The four kinds of entity a prune can remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A service period.
    ServicePeriod,
    /// A trip.
    Trip,
    /// A route.
    Route,
    /// A stop.
    Stop,
}

impl EntityKind {
    /// Returns the snake case name used in logs and metrics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ServicePeriod => "service_period",
            Self::Trip => "trip",
            Self::Route => "route",
            Self::Stop => "stop",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named calendar validity window that trips are scheduled against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePeriod {
    /// Service identifier.
    pub id: ServiceId,
    /// First day of service (inclusive).
    pub start_date: ServiceDate,
    /// Last day of service (inclusive).
    pub end_date: ServiceDate,
}

impl ServicePeriod {
    /// Creates a service period.
    #[must_use]
    pub fn new(id: ServiceId, start_date: ServiceDate, end_date: ServiceDate) -> Self {
        Self {
            id,
            start_date,
            end_date,
        }
    }

    /// Returns true if `date` falls inside the validity window.
    #[must_use]
    pub fn is_active_on(&self, date: ServiceDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Returns the validity window as `(start, end)`.
    #[must_use]
    pub fn date_range(&self) -> (ServiceDate, ServiceDate) {
        (self.start_date, self.end_date)
    }
}

/// A single scheduled journey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    /// Trip identifier.
    pub id: TripId,
    /// The service period this trip runs under.
    pub service_id: ServiceId,
    /// The route this trip belongs to.
    pub route_id: RouteId,
    /// Destination sign text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headsign: Option<String>,
}

impl Trip {
    /// Creates a trip without a headsign.
    #[must_use]
    pub fn new(id: TripId, service_id: ServiceId, route_id: RouteId) -> Self {
        Self {
            id,
            service_id,
            route_id,
            headsign: None,
        }
    }
}

/// A route: a named group of trips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Route identifier.
    pub id: RouteId,
    /// Short public name, e.g. "42".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    /// Long public name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_name: Option<String>,
}

impl Route {
    /// Creates an unnamed route.
    #[must_use]
    pub fn new(id: RouteId) -> Self {
        Self {
            id,
            short_name: None,
            long_name: None,
        }
    }

    /// Returns a display label built from the short and long names.
    #[must_use]
    pub fn label(&self) -> Option<String> {
        match (&self.short_name, &self.long_name) {
            (Some(short), Some(long)) => Some(format!("{short} {long}")),
            (Some(name), None) | (None, Some(name)) => Some(name.clone()),
            (None, None) => None,
        }
    }
}

/// A stop where vehicles pick up or drop off riders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    /// Stop identifier.
    pub id: StopId,
    /// Public stop name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Stop {
    /// Creates an unnamed stop.
    #[must_use]
    pub fn new(id: StopId) -> Self {
        Self { id, name: None }
    }
}

/// The association of a trip with a stop it serves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopTime {
    /// The trip making the call.
    pub trip_id: TripId,
    /// The stop being served.
    pub stop_id: StopId,
    /// Position of this call within the trip.
    pub stop_sequence: u32,
}

impl StopTime {
    /// Creates a stop-time.
    #[must_use]
    pub fn new(trip_id: TripId, stop_id: StopId, stop_sequence: u32) -> Self {
        Self {
            trip_id,
            stop_id,
            stop_sequence,
        }
    }
}
