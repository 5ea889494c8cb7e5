//! Run a single task in a blocking thread and report its outcome.

use std::fs;
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

use crate::error::TaskExecutionError;
use crate::outcome::{Outcome, OutcomeKind};
use crate::task::Task;

use super::runner::CommandRunner;

/// Runs `task` in `spawn_blocking` and sends exactly one outcome, even if the
/// task body panics.
pub(super) async fn run_task<R: CommandRunner>(
    runner: Arc<R>,
    task: Task,
    outcomes: UnboundedSender<Outcome>,
) {
    let track_id = task.track_id;
    let command = task.command_line();
    let outcome = match tokio::task::spawn_blocking(move || run_blocking(runner.as_ref(), &task)).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(track = track_id, "task body did not complete: {}", e);
            failed(track_id, TaskExecutionError::Panicked { command })
        }
    };
    if outcomes.send(outcome).is_err() {
        tracing::warn!(track = track_id, "outcome receiver closed before task reported");
    }
}

fn failed(track_id: usize, err: TaskExecutionError) -> Outcome {
    Outcome::new(track_id, OutcomeKind::Failed, err.to_string())
}

/// Create the output directory, skip if the output exists, otherwise run.
pub(super) fn run_blocking<R: CommandRunner + ?Sized>(runner: &R, task: &Task) -> Outcome {
    let output = &task.output;
    if let Some(dir) = output.parent().filter(|d| !d.as_os_str().is_empty()) {
        if let Err(source) = fs::create_dir_all(dir) {
            return failed(
                task.track_id,
                TaskExecutionError::CreateDir {
                    dir: dir.to_path_buf(),
                    source,
                },
            );
        }
    }

    if output.exists() {
        tracing::debug!(track = task.track_id, path = %output.display(), "output exists, skipping");
        return Outcome::new(
            task.track_id,
            OutcomeKind::Skipped,
            format!("{} skipped, '{}' already exists", task.kind, output.display()),
        );
    }

    tracing::debug!(track = task.track_id, "running {}", task.command_line());
    match runner.run(&task.argv) {
        Ok(out) if out.success => Outcome::new(
            task.track_id,
            OutcomeKind::Success,
            format!("{} done: '{}'", task.kind, output.display()),
        ),
        Ok(out) => failed(
            task.track_id,
            TaskExecutionError::NonZeroExit {
                command: task.command_line(),
                code: out.code,
                stderr: out.stderr,
            },
        ),
        Err(source) => failed(
            task.track_id,
            TaskExecutionError::Spawn {
                command: task.command_line(),
                source,
            },
        ),
    }
}
