//! Check command - report dangling references.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize;

use timetrim_core::IntegrityViolation;
use timetrim_core::integrity;

use super::load_schedule;
use crate::OutputFormat;

/// Arguments for the check command.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Schedule snapshot to read.
    #[arg()]
    pub input: PathBuf,
}

/// Execute the check command.
///
/// Returns `Ok(true)` when the schedule is clean.
///
/// # Errors
///
/// Returns an error if the schedule cannot be read.
pub fn execute(args: &CheckArgs, format: OutputFormat) -> Result<bool> {
    let violations = run(args, format, &mut io::stdout().lock())?;
    Ok(violations.is_empty())
}

/// Checks `args.input` and renders every violation to `out`.
///
/// # Errors
///
/// Returns an error if the schedule cannot be read.
pub fn run(
    args: &CheckArgs,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<Vec<IntegrityViolation>> {
    let schedule = load_schedule(&args.input)?;
    let violations = integrity::check(&schedule);
    if !violations.is_empty() {
        tracing::warn!(count = violations.len(), "schedule has integrity violations");
    }

    match format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&violations)?)?;
        }
        OutputFormat::Text => {
            if violations.is_empty() {
                writeln!(out, "{}", "No integrity violations".green())?;
            } else {
                writeln!(
                    out,
                    "{}",
                    format!("{} integrity violations:", violations.len()).red()
                )?;
                for violation in &violations {
                    writeln!(out, "  {violation}")?;
                }
            }
        }
        OutputFormat::Table => {
            use tabled::{Table, Tabled};

            #[derive(Tabled)]
            struct ViolationRow {
                #[tabled(rename = "Violation")]
                violation: String,
            }

            if violations.is_empty() {
                writeln!(out, "No integrity violations")?;
            } else {
                let rows: Vec<_> = violations
                    .iter()
                    .map(|v| ViolationRow {
                        violation: v.to_string(),
                    })
                    .collect();
                writeln!(out, "{}", Table::new(rows))?;
            }
        }
    }

    Ok(violations)
}
