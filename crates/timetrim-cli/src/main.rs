//! timetrim - prune expired service from transit schedules.
//!
//! The main entry point for the `timetrim` CLI binary.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use timetrim_cli::{Cli, Commands, commands};
use timetrim_core::observability::init_logging;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.log_format.into(), "info");
    timetrim_prune::metrics::register_metrics();

    match &cli.command {
        Commands::Prune(args) => commands::prune::execute(args, cli.format)?,
        Commands::Plan(args) => commands::plan::execute(args, cli.format)?,
        Commands::ShowStop(args) => commands::show_stop::execute(args, cli.format)?,
        Commands::Check(args) => {
            if !commands::check::execute(args, cli.format)? {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
