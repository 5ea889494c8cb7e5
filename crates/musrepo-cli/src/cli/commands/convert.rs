//! `musrepo convert` – transcode stage only, reading already acquired tracks.

use anyhow::{bail, Result};
use musrepo_core::collector::RunSummary;
use musrepo_core::pipeline::partition_missing_inputs;
use musrepo_core::task::{build_transcode_tasks, Task, TaskPlan};
use std::io::Write;
use std::path::Path;

use super::{execute_plan, RunContext};

pub async fn run_convert(
    ctx: &RunContext,
    full_path: &Path,
    out_path: &Path,
    skip_missing: bool,
) -> Result<RunSummary> {
    let set = build_transcode_tasks(ctx.manifest.tracks(), full_path, out_path, &ctx.tools);
    let mut plan = TaskPlan::transcode_only(set);
    if ctx.dry_run {
        return execute_plan(plan, true).await;
    }

    let tasks = std::mem::take(&mut plan.transcode);
    plan.transcode = drop_missing(tasks, skip_missing, std::io::stdout().lock())?;
    execute_plan(plan, false).await
}

/// Keeps tasks whose input exists. A missing input is an error unless
/// `skip_missing` is set, in which case each skipped task is listed on `out`.
fn drop_missing<W: Write>(tasks: Vec<Task>, skip_missing: bool, mut out: W) -> Result<Vec<Task>> {
    let (present, missing) = partition_missing_inputs(tasks);
    if let Some(first) = missing.first() {
        if !skip_missing {
            bail!(
                "missing input '{}' for '{}' (use --skip-missing to continue without it)",
                first.input,
                first.output.display()
            );
        }
        for task in &missing {
            writeln!(
                out,
                "Skipping missing '{}' for '{}'",
                task.input,
                task.output.display()
            )?;
        }
        tracing::info!(count = missing.len(), "skipped pieces with missing input");
    }
    Ok(present)
}
