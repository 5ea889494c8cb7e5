//! Glue between the task plan, the executor and the collector.

use std::io::{self, Write};
use std::path::Path;

use tokio::sync::mpsc;

use crate::collector::{Collector, RunSummary};
use crate::executor::{CommandRunner, Executor};
use crate::task::{Task, TaskPlan};

/// Prints one composed command per line, Acquire tasks first. Nothing is run.
pub fn write_dry_run<W: Write>(plan: &TaskPlan, mut w: W) -> io::Result<()> {
    for task in plan.tasks() {
        writeln!(w, "{}", task.command_line())?;
    }
    w.flush()
}

/// Splits tasks into those whose input file exists and those whose doesn't.
/// Remote locators always count as present.
pub fn partition_missing_inputs(tasks: Vec<Task>) -> (Vec<Task>, Vec<Task>) {
    tasks
        .into_iter()
        .partition(|task| task.input.file().map_or(true, Path::exists))
}

/// Reports the plan's construction errors, executes it, and collects every outcome.
///
/// Returns after the outcome stream has closed, i.e. after every task reported.
pub async fn run_pipeline<R, O, E>(
    executor: &Executor<R>,
    plan: TaskPlan,
    collector: &mut Collector<O, E>,
) -> RunSummary
where
    R: CommandRunner,
    O: Write,
    E: Write,
{
    for error in &plan.errors {
        collector.report_track_error(error);
    }
    tracing::info!(
        acquire = plan.acquire.len(),
        transcode = plan.transcode.len(),
        "executing plan"
    );

    let (tx, rx) = mpsc::unbounded_channel();
    let ((), summary) = tokio::join!(executor.execute(plan, tx), collector.collect(rx));

    tracing::info!(
        succeeded = summary.succeeded,
        skipped = summary.skipped,
        failed = summary.failed,
        "run finished"
    );
    summary
}
