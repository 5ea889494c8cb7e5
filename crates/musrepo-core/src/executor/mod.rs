//! Dependency-aware concurrent task executor.
//!
//! Tasks are grouped per track. Every track group runs concurrently; inside a
//! group the Acquire task (if any) runs first and its Transcode tasks are
//! released together once it has reported, whatever its result. Each task
//! body owns one blocking thread for the lifetime of its process.
//!
//! Outcomes are sent over an unbounded channel. The executor holds one sender
//! and hands a clone to every task; all of them are dropped once the per-track
//! and the outer `JoinSet` barriers have released, which closes the stream
//! exactly once.

mod invoke;
mod runner;

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinSet;

use crate::outcome::Outcome;
use crate::task::{Task, TaskPlan};

pub use runner::{CommandRunner, ProcessOutput, SystemRunner};

/// Tasks of one track, split by dependency.
#[derive(Debug, Default)]
struct TrackGroup {
    acquire: Vec<Task>,
    transcode: Vec<Task>,
}

fn group_by_track(plan: TaskPlan) -> BTreeMap<usize, TrackGroup> {
    let mut groups: BTreeMap<usize, TrackGroup> = BTreeMap::new();
    for task in plan.acquire {
        groups.entry(task.track_id).or_default().acquire.push(task);
    }
    for task in plan.transcode {
        groups.entry(task.track_id).or_default().transcode.push(task);
    }
    groups
}

/// Runs a task plan with a given process runner.
pub struct Executor<R: CommandRunner = SystemRunner> {
    runner: Arc<R>,
}

impl Default for Executor<SystemRunner> {
    fn default() -> Self {
        Self::new(SystemRunner)
    }
}

impl<R: CommandRunner> Executor<R> {
    pub fn new(runner: R) -> Self {
        Self {
            runner: Arc::new(runner),
        }
    }

    pub fn with_shared_runner(runner: Arc<R>) -> Self {
        Self { runner }
    }

    /// Runs every task in `plan`, sending one outcome per task to `outcomes`.
    ///
    /// Returns once every task has reported; `outcomes` is dropped on return.
    pub async fn execute(&self, plan: TaskPlan, outcomes: UnboundedSender<Outcome>) {
        let groups = group_by_track(plan);
        tracing::debug!(tracks = groups.len(), "executor starting");

        let mut tracks = JoinSet::new();
        for (track_id, group) in groups {
            let runner = Arc::clone(&self.runner);
            let tx = outcomes.clone();
            tracks.spawn(run_track_group(runner, track_id, group, tx));
        }
        drop(outcomes);

        while let Some(res) = tracks.join_next().await {
            if let Err(e) = res {
                tracing::error!("track group join: {}", e);
            }
        }
        tracing::debug!("executor finished");
    }
}

async fn run_track_group<R: CommandRunner>(
    runner: Arc<R>,
    track_id: usize,
    group: TrackGroup,
    outcomes: UnboundedSender<Outcome>,
) {
    if !group.acquire.is_empty() {
        let mut acquire = JoinSet::new();
        for task in group.acquire {
            acquire.spawn(invoke::run_task(Arc::clone(&runner), task, outcomes.clone()));
        }
        join_all(&mut acquire).await;
        tracing::debug!(track = track_id, "acquire reported, releasing transcode tasks");
    }

    let mut transcode = JoinSet::new();
    for task in group.transcode {
        transcode.spawn(invoke::run_task(Arc::clone(&runner), task, outcomes.clone()));
    }
    join_all(&mut transcode).await;
}

async fn join_all(set: &mut JoinSet<()>) {
    while let Some(res) = set.join_next().await {
        if let Err(e) = res {
            tracing::error!("task join: {}", e);
        }
    }
}
