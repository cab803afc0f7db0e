//! Prune command - remove expired service and write the result.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;

use timetrim_core::{ScheduleSnapshot, ServiceDate};
use timetrim_prune::{PrunePolicy, PruneReport, Pruner, StageEvent};

use super::{EventLog, PolicyArgs, env_policy, load_schedule, write_events_table, write_events_text};
use crate::OutputFormat;

/// Arguments for the prune command.
#[derive(Debug, Args)]
pub struct PruneArgs {
    /// Service periods ending before this date are removed.
    #[arg(long, value_name = "YYYYMMDD")]
    pub date_cutoff: ServiceDate,

    /// Schedule snapshot to read.
    #[arg()]
    pub input: PathBuf,

    /// Where to write the pruned snapshot.
    #[arg()]
    pub output: PathBuf,

    /// List every removed entity.
    #[arg(long)]
    pub list_removed: bool,

    /// Policy overrides.
    #[command(flatten)]
    pub policy: PolicyArgs,
}

#[derive(Serialize)]
struct PruneOutput<'a> {
    report: &'a PruneReport,
    events: &'a [StageEvent],
}

/// Execute the prune command.
///
/// # Errors
///
/// Returns an error if the policy or cutoff is invalid, or if the schedule
/// cannot be read or written.
pub fn execute(args: &PruneArgs, format: OutputFormat) -> Result<()> {
    run(args, env_policy()?, format, &mut io::stdout().lock())?;
    Ok(())
}

/// Prunes `args.input` under `base` overlaid with the flags, writes
/// `args.output`, and renders the report to `out`.
///
/// Nothing is written to `args.output` if the prune is rejected.
///
/// # Errors
///
/// Returns an error if the policy or cutoff is invalid, or if the schedule
/// cannot be read or written.
pub fn run(
    args: &PruneArgs,
    base: PrunePolicy,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<PruneReport> {
    let policy = args.policy.apply(base)?;
    let mut schedule = load_schedule(&args.input)?;

    let mut log = EventLog::default();
    let report = Pruner::new(policy)
        .with_list_removed(args.list_removed)
        .prune(&mut schedule, args.date_cutoff, &mut log)?;

    ScheduleSnapshot::from_schedule(&schedule)
        .write_to_path(&args.output)
        .with_context(|| format!("failed to write schedule to {}", args.output.display()))?;
    tracing::info!(output = %args.output.display(), "wrote pruned schedule");

    match format {
        OutputFormat::Json => {
            let output = PruneOutput {
                report: &report,
                events: &log.events,
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
        }
        OutputFormat::Text => {
            writeln!(out, "Pruned at cutoff {}:", report.cutoff)?;
            write_events_text(out, &log.events)?;
            writeln!(
                out,
                "Removed {} entities, wrote {}",
                report.total_removed(),
                args.output.display()
            )?;
            write_warnings(out, &report)?;
        }
        OutputFormat::Table => {
            write_events_table(out, &log.events)?;
            write_warnings(out, &report)?;
        }
    }

    Ok(report)
}

fn write_warnings(out: &mut dyn Write, report: &PruneReport) -> Result<()> {
    for warning in &report.warnings {
        writeln!(
            out,
            "{} {} {} was already absent",
            "warning:".yellow(),
            warning.entity,
            warning.id
        )?;
    }
    Ok(())
}
