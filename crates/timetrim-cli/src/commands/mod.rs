//! CLI command implementations.
//!
//! Each command has an `execute` entry point that prints to stdout and a
//! `run` function that writes to any [`Write`] and returns what it computed.

pub mod check;
pub mod plan;
pub mod prune;
pub mod show_stop;

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Args;
use owo_colors::OwoColorize;
use tabled::{Table, Tabled};

use timetrim_core::{MemorySchedule, ScheduleSnapshot, ServiceDate};
use timetrim_prune::{PrunePolicy, Reporter, StageEvent};

/// Policy overrides shared by commands that take a cutoff.
#[derive(Debug, Clone, Default, Args)]
pub struct PolicyArgs {
    /// Earliest accepted cutoff (overrides `TIMETRIM_CUTOFF_MIN`).
    #[arg(long, value_name = "YYYYMMDD")]
    pub cutoff_min: Option<ServiceDate>,

    /// Latest accepted cutoff (overrides `TIMETRIM_CUTOFF_MAX`).
    #[arg(long, value_name = "YYYYMMDD")]
    pub cutoff_max: Option<ServiceDate>,

    /// Keep routes and stops that have no trips at all.
    #[arg(long)]
    pub keep_orphans: bool,
}

impl PolicyArgs {
    /// Overlays the flags onto `base`.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting bounds are inverted.
    pub fn apply(&self, base: PrunePolicy) -> Result<PrunePolicy> {
        let mut policy = base;
        if let Some(min) = self.cutoff_min {
            policy.cutoff_min = min;
        }
        if let Some(max) = self.cutoff_max {
            policy.cutoff_max = max;
        }
        if self.keep_orphans {
            policy.prune_orphans = false;
        }
        if let Some(message) = policy.validate() {
            bail!("invalid prune policy: {message}");
        }
        Ok(policy)
    }
}

/// Loads the environment policy.
///
/// # Errors
///
/// Returns an error if a `TIMETRIM_*` variable is malformed.
pub fn env_policy() -> Result<PrunePolicy> {
    PrunePolicy::from_env().context("failed to read prune policy from environment")
}

/// Loads a schedule snapshot from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_schedule(path: &Path) -> Result<MemorySchedule> {
    let snapshot = ScheduleSnapshot::from_path(path)
        .with_context(|| format!("failed to load schedule from {}", path.display()))?;
    Ok(snapshot.into_schedule())
}

/// Keeps every stage event for rendering once the run is done.
#[derive(Debug, Default)]
pub struct EventLog {
    /// Events in emission order.
    pub events: Vec<StageEvent>,
}

impl Reporter for EventLog {
    fn report(&mut self, event: &StageEvent) {
        self.events.push(event.clone());
    }
}

/// Writes one line per stage event, followed by removed entities if listed.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_events_text(out: &mut dyn Write, events: &[StageEvent]) -> Result<()> {
    for event in events {
        let removed = if event.removed > 0 {
            event.removed.red().to_string()
        } else {
            event.removed.to_string()
        };
        writeln!(
            out,
            "  {:<8} {:<15} {removed} of {} removed, {} remaining",
            event.stage.as_str(),
            event.entity.as_str(),
            event.total,
            event.remaining
        )?;
        for entity in event.removed_entities.iter().flatten() {
            writeln!(out, "      - {}", entity.dimmed())?;
        }
    }
    Ok(())
}

/// Writes stage events as a table.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_events_table(out: &mut dyn Write, events: &[StageEvent]) -> Result<()> {
    #[derive(Tabled)]
    struct StageRow {
        #[tabled(rename = "Stage")]
        stage: &'static str,
        #[tabled(rename = "Entity")]
        entity: &'static str,
        #[tabled(rename = "Total")]
        total: usize,
        #[tabled(rename = "Removed")]
        removed: usize,
        #[tabled(rename = "Remaining")]
        remaining: usize,
    }

    let rows: Vec<_> = events
        .iter()
        .map(|e| StageRow {
            stage: e.stage.as_str(),
            entity: e.entity.as_str(),
            total: e.total,
            removed: e.removed,
            remaining: e.remaining,
        })
        .collect();
    writeln!(out, "{}", Table::new(rows))?;
    Ok(())
}
