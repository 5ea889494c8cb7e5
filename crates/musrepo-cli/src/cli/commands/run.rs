//! `musrepo run` – acquire remote tracks, then cut every track into pieces.

use anyhow::Result;
use musrepo_core::collector::RunSummary;
use musrepo_core::task::build_plan;
use std::path::Path;

use super::{execute_plan, RunContext};

pub async fn run_full(ctx: &RunContext, full_path: &Path, out_path: &Path) -> Result<RunSummary> {
    let plan = build_plan(ctx.manifest.tracks(), full_path, out_path, &ctx.tools);
    tracing::debug!(
        acquire = plan.acquire.len(),
        transcode = plan.transcode.len(),
        errors = plan.errors.len(),
        "built plan"
    );
    execute_plan(plan, ctx.dry_run).await
}
