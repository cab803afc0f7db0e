//! # timetrim-cli
//!
//! Command-line interface for timetrim.
//!
//! ## Commands
//!
//! - `timetrim prune` - Remove expired service and write the pruned schedule
//! - `timetrim plan` - Show what a prune would remove without writing anything
//! - `timetrim show-stop` - List the trips, routes and services at a stop
//! - `timetrim check` - Report dangling references
//!
//! ## Configuration
//!
//! Schedules are read and written as JSON snapshots. Cutoff bounds and the
//! orphan policy come from the environment and can be overridden per run:
//!
//! - `TIMETRIM_CUTOFF_MIN` - Earliest accepted cutoff (default: `20170101`)
//! - `TIMETRIM_CUTOFF_MAX` - Latest accepted cutoff (default: `20220101`)
//! - `TIMETRIM_PRUNE_ORPHANS` - Remove routes and stops that never had trips
//!   (default: `true`)
//! - `RUST_LOG` - Log filter (default: `info`)

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod commands;

use clap::{Parser, Subcommand};

use timetrim_core::observability::LogFormat;

/// timetrim - prune expired service from transit schedules.
#[derive(Debug, Parser)]
#[command(name = "timetrim")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Log format (logs go to stderr).
    #[arg(long, global = true, env = "TIMETRIM_LOG_FORMAT", default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Remove expired service and write the pruned schedule.
    Prune(commands::prune::PruneArgs),
    /// Show what a prune would remove.
    Plan(commands::plan::PlanArgs),
    /// Show the trips serving a stop.
    ShowStop(commands::show_stop::ShowStopArgs),
    /// Check a schedule for dangling references.
    Check(commands::check::CheckArgs),
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// Table output.
    Table,
}

/// Log format selector.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum LogFormatArg {
    /// Human-readable logs.
    #[default]
    Pretty,
    /// JSON structured logs.
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Json => Self::Json,
        }
    }
}
