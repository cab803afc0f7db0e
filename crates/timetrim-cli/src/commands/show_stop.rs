//! Show-stop command - list the service at one stop.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize;

use timetrim_core::inspect::{StopInfo, StopTripInfo, stop_info};
use timetrim_core::{ServiceDate, StopId};

use super::load_schedule;
use crate::OutputFormat;

/// Arguments for the show-stop command.
#[derive(Debug, Args)]
pub struct ShowStopArgs {
    /// Stop to inspect.
    #[arg(long)]
    pub stop_id: StopId,

    /// Only list trips whose service is active on this date.
    #[arg(long, value_name = "YYYYMMDD")]
    pub date: Option<ServiceDate>,

    /// Schedule snapshot to read.
    #[arg()]
    pub input: PathBuf,
}

/// Execute the show-stop command.
///
/// # Errors
///
/// Returns an error if the schedule cannot be read or the stop does not
/// exist.
pub fn execute(args: &ShowStopArgs, format: OutputFormat) -> Result<()> {
    run(args, format, &mut io::stdout().lock())?;
    Ok(())
}

/// Looks up `args.stop_id` and renders its trips to `out`.
///
/// # Errors
///
/// Returns an error if the schedule cannot be read or the stop does not
/// exist.
pub fn run(args: &ShowStopArgs, format: OutputFormat, out: &mut dyn Write) -> Result<StopInfo> {
    let schedule = load_schedule(&args.input)?;
    let info = stop_info(&schedule, &args.stop_id, args.date)?;

    match format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&info)?)?;
        }
        OutputFormat::Text => {
            match &info.stop.name {
                Some(name) => writeln!(out, "Stop: {} ({name})", info.stop.id.bold())?,
                None => writeln!(out, "Stop: {}", info.stop.id.bold())?,
            }
            if let Some(date) = info.active_on {
                writeln!(out, "Active on: {date}")?;
            }
            if info.trips.is_empty() {
                writeln!(out, "No trips found")?;
            } else {
                writeln!(out)?;
                writeln!(out, "Trips:")?;
                for trip in &info.trips {
                    writeln!(
                        out,
                        "  {} route {} service {}{}",
                        trip.trip.id,
                        route_label(trip),
                        service_label(trip),
                        trip.trip
                            .headsign
                            .as_ref()
                            .map_or(String::new(), |h| format!(" to {h}"))
                    )?;
                }
            }
            if info.inactive_trips > 0 {
                writeln!(
                    out,
                    "{}",
                    format!("{} inactive trips hidden", info.inactive_trips).dimmed()
                )?;
            }
        }
        OutputFormat::Table => {
            use tabled::{Table, Tabled};

            #[derive(Tabled)]
            struct TripRow {
                #[tabled(rename = "Trip")]
                trip: String,
                #[tabled(rename = "Route")]
                route: String,
                #[tabled(rename = "Service")]
                service: String,
                #[tabled(rename = "Headsign")]
                headsign: String,
            }

            let rows: Vec<_> = info
                .trips
                .iter()
                .map(|t| TripRow {
                    trip: t.trip.id.to_string(),
                    route: route_label(t),
                    service: service_label(t),
                    headsign: t.trip.headsign.clone().unwrap_or_default(),
                })
                .collect();

            if rows.is_empty() {
                writeln!(out, "No trips found")?;
            } else {
                writeln!(out, "{}", Table::new(rows))?;
            }
        }
    }

    Ok(info)
}

fn route_label(trip: &StopTripInfo) -> String {
    match trip.route.as_ref().and_then(timetrim_core::Route::label) {
        Some(label) => label,
        None => trip.trip.route_id.to_string(),
    }
}

fn service_label(trip: &StopTripInfo) -> String {
    match &trip.service_period {
        Some(period) => format!(
            "{} ({}-{})",
            period.id, period.start_date, period.end_date
        ),
        None => format!("{} (missing)", trip.trip.service_id),
    }
}
