//! Task descriptors for the two pipeline stages.
//!
//! A [`Task`] is one external-process invocation: an Acquire task fetches a
//! track's audio from its source locator, a Transcode task cuts one segment
//! out of the track's local audio file. Both carry the same four fields;
//! the executor and the collector only look at those.

mod build;

use std::fmt;
use std::path::{Path, PathBuf};

pub use build::{build_acquire_tasks, build_plan, build_transcode_tasks, TaskPlan, TaskSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Acquire,
    Transcode,
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskKind::Acquire => write!(f, "acquire"),
            TaskKind::Transcode => write!(f, "transcode"),
        }
    }
}

/// What a task reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskInput {
    /// Remote source locator, passed verbatim to the acquisition tool.
    Locator(String),
    /// Local audio file.
    File(PathBuf),
}

impl TaskInput {
    /// The local file this input names, if any.
    pub fn file(&self) -> Option<&Path> {
        match self {
            TaskInput::Locator(_) => None,
            TaskInput::File(path) => Some(path),
        }
    }
}

impl fmt::Display for TaskInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskInput::Locator(locator) => f.write_str(locator),
            TaskInput::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// One unit of work. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub kind: TaskKind,
    pub track_id: usize,
    pub input: TaskInput,
    pub output: PathBuf,
    /// Literal process invocation; `argv[0]` is the program.
    pub argv: Vec<String>,
}

impl Task {
    /// `"{track_id}: 'arg0', 'arg1', ..."`, as printed by dry-run and failure reports.
    pub fn command_line(&self) -> String {
        format_command(self.track_id, &self.argv)
    }
}

pub fn format_command(track_id: usize, argv: &[String]) -> String {
    format!("{}: '{}'", track_id, argv.join("', '"))
}
