//! Terminal result of one task.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    Success,
    Skipped,
    Failed,
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeKind::Success => write!(f, "success"),
            OutcomeKind::Skipped => write!(f, "skipped"),
            OutcomeKind::Failed => write!(f, "failed"),
        }
    }
}

/// Produced exactly once per task by the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub track_id: usize,
    pub kind: OutcomeKind,
    /// Human-readable; on failure includes the composed command and captured stderr.
    pub message: String,
}

impl Outcome {
    pub fn new(track_id: usize, kind: OutcomeKind, message: impl Into<String>) -> Self {
        Self {
            track_id,
            kind,
            message: message.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.kind == OutcomeKind::Failed
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "track {}: {}", self.track_id, self.message)
    }
}
