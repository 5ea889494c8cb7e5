//! CLI command handlers. Each pipeline is in its own file.

mod completions;
mod convert;
mod download;
mod run;

use anyhow::{Context, Result};
use musrepo_core::collector::{Collector, RunSummary};
use musrepo_core::config::ToolConfig;
use musrepo_core::executor::{Executor, SystemRunner};
use musrepo_core::manifest::Manifest;
use musrepo_core::pipeline::{run_pipeline, write_dry_run};
use musrepo_core::task::TaskPlan;

pub use completions::run_completions;
pub use convert::run_convert;
pub use download::run_download;
pub use run::run_full;

/// Everything a pipeline command needs, built once per invocation.
pub struct RunContext {
    pub tools: ToolConfig,
    pub manifest: Manifest,
    pub dry_run: bool,
}

/// Prints the plan (dry-run) or executes it, reporting to stdout/stderr.
async fn execute_plan(plan: TaskPlan, dry_run: bool) -> Result<RunSummary> {
    let mut collector = Collector::stdio();
    if dry_run {
        for error in &plan.errors {
            collector.report_track_error(error);
        }
        write_dry_run(&plan, std::io::stdout().lock()).context("write dry-run listing")?;
        return Ok(collector.summary());
    }

    if plan.is_empty() {
        println!("Nothing to do.");
    }
    let executor = Executor::new(SystemRunner);
    Ok(run_pipeline(&executor, plan, &mut collector).await)
}
