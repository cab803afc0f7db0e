//! JSON snapshot of a schedule.
//!
//! A snapshot is the plain document the command-line tool reads and writes:
//!
//! ```json
//! {
//!   "servicePeriods": [{"id": "S1", "startDate": "20170101", "endDate": "20171231"}],
//!   "trips": [{"id": "T1", "serviceId": "S1", "routeId": "R1"}],
//!   "routes": [{"id": "R1", "shortName": "1"}],
//!   "stops": [{"id": "P1", "name": "Main St"}],
//!   "stopTimes": [{"tripId": "T1", "stopId": "P1", "stopSequence": 1}]
//! }
//! ```
//!
//! It carries exactly what the prune needs and nothing of any particular
//! feed format.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::ScheduleGraph;
use crate::memory::MemorySchedule;
use crate::model::{Route, ServicePeriod, Stop, StopTime, Trip};

/// Serializable form of a whole schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSnapshot {
    /// Service periods.
    #[serde(default)]
    pub service_periods: Vec<ServicePeriod>,
    /// Trips.
    #[serde(default)]
    pub trips: Vec<Trip>,
    /// Routes.
    #[serde(default)]
    pub routes: Vec<Route>,
    /// Stops.
    #[serde(default)]
    pub stops: Vec<Stop>,
    /// Stop-times.
    #[serde(default)]
    pub stop_times: Vec<StopTime>,
}

impl ScheduleSnapshot {
    /// Reads a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if the document is malformed, including
    /// blank ids and dates that are not `YYYYMMDD`.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Reads a snapshot from a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be opened, or
    /// [`Error::Serialization`] if it is malformed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| Error::io(format!("failed to open {}", path.display()), e))?;
        Self::from_reader(BufReader::new(file))
    }

    /// Writes the snapshot as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if encoding or writing fails.
    pub fn to_writer(&self, writer: impl Write) -> Result<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Writes the snapshot to a file, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be created or flushed.
    pub fn write_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|e| Error::io(format!("failed to create {}", path.display()), e))?;
        let mut writer = BufWriter::new(file);
        self.to_writer(&mut writer)?;
        writer
            .flush()
            .map_err(|e| Error::io(format!("failed to flush {}", path.display()), e))
    }

    /// Materializes the snapshot into an in-memory schedule.
    ///
    /// Duplicate ids are resolved last-write-wins; each replacement is
    /// logged at `warn`.
    #[must_use]
    pub fn into_schedule(self) -> MemorySchedule {
        let mut schedule = MemorySchedule::new();
        for period in self.service_periods {
            if let Some(old) = schedule.insert_service(period) {
                tracing::warn!(service_id = %old.id, "duplicate service period id; keeping last");
            }
        }
        for route in self.routes {
            if let Some(old) = schedule.insert_route(route) {
                tracing::warn!(route_id = %old.id, "duplicate route id; keeping last");
            }
        }
        for stop in self.stops {
            if let Some(old) = schedule.insert_stop(stop) {
                tracing::warn!(stop_id = %old.id, "duplicate stop id; keeping last");
            }
        }
        for trip in self.trips {
            if let Some(old) = schedule.insert_trip(trip) {
                tracing::warn!(trip_id = %old.id, "duplicate trip id; keeping last");
            }
        }
        for stop_time in self.stop_times {
            schedule.insert_stop_time(stop_time);
        }
        schedule
    }

    /// Captures the current state of an in-memory schedule.
    #[must_use]
    pub fn from_schedule(schedule: &MemorySchedule) -> Self {
        Self {
            service_periods: schedule.service_periods().cloned().collect(),
            trips: schedule.trips().cloned().collect(),
            routes: schedule.routes().cloned().collect(),
            stops: schedule.stops().cloned().collect(),
            stop_times: schedule.stop_times().to_vec(),
        }
    }
}
