//! `musrepo download` – acquire stage only.

use anyhow::Result;
use musrepo_core::collector::RunSummary;
use musrepo_core::task::{build_acquire_tasks, TaskPlan};
use std::path::Path;

use super::{execute_plan, RunContext};

pub async fn run_download(ctx: &RunContext, out_path: &Path) -> Result<RunSummary> {
    let set = build_acquire_tasks(ctx.manifest.tracks(), out_path, &ctx.tools);
    execute_plan(TaskPlan::acquire_only(set), ctx.dry_run).await
}
