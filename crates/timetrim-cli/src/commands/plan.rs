//! Plan command - dry run of a prune.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use timetrim_core::ServiceDate;
use timetrim_prune::{PrunePolicy, Pruner, RemovalPlan, StageEvent};

use super::{EventLog, PolicyArgs, env_policy, load_schedule, write_events_table, write_events_text};
use crate::OutputFormat;

/// Arguments for the plan command.
#[derive(Debug, Args)]
pub struct PlanArgs {
    /// Service periods ending before this date would be removed.
    #[arg(long, value_name = "YYYYMMDD")]
    pub date_cutoff: ServiceDate,

    /// Schedule snapshot to read.
    #[arg()]
    pub input: PathBuf,

    /// Policy overrides.
    #[command(flatten)]
    pub policy: PolicyArgs,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanOutput<'a> {
    cutoff: ServiceDate,
    plan: &'a RemovalPlan,
    events: &'a [StageEvent],
}

/// Execute the plan command.
///
/// # Errors
///
/// Returns an error if the policy or cutoff is invalid, or if the schedule
/// cannot be read.
pub fn execute(args: &PlanArgs, format: OutputFormat) -> Result<()> {
    run(args, env_policy()?, format, &mut io::stdout().lock())?;
    Ok(())
}

/// Computes what a prune of `args.input` would remove and renders it to
/// `out`. The input is never written.
///
/// # Errors
///
/// Returns an error if the policy or cutoff is invalid, or if the schedule
/// cannot be read.
pub fn run(
    args: &PlanArgs,
    base: PrunePolicy,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<RemovalPlan> {
    let policy = args.policy.apply(base)?;
    let schedule = load_schedule(&args.input)?;

    let mut log = EventLog::default();
    let plan = Pruner::new(policy)
        .with_list_removed(true)
        .plan(&schedule, args.date_cutoff, &mut log)?;

    match format {
        OutputFormat::Json => {
            let output = PlanOutput {
                cutoff: args.date_cutoff,
                plan: &plan,
                events: &log.events,
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
        }
        OutputFormat::Text => {
            writeln!(out, "Dry run at cutoff {}:", args.date_cutoff)?;
            write_events_text(out, &log.events)?;
            if plan.is_empty() {
                writeln!(out, "Nothing would be removed")?;
            } else {
                writeln!(out, "{} entities would be removed", plan.len())?;
            }
        }
        OutputFormat::Table => write_events_table(out, &log.events)?,
    }

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_args_parsing() {
        use clap::Parser;

        #[derive(Parser)]
        struct TestCli {
            #[command(flatten)]
            args: PlanArgs,
        }

        let cli = TestCli::parse_from(["test", "--date-cutoff", "20170101", "in.json"]);
        assert_eq!(cli.args.date_cutoff.as_yyyymmdd(), 20_170_101);
        assert_eq!(cli.args.input, PathBuf::from("in.json"));
        assert!(!cli.args.policy.keep_orphans);
    }
}
