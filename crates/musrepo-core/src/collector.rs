//! Outcome reporting and run status.
//!
//! The collector drains the executor's outcome stream, writes one line per
//! outcome (successes and skips to `out`, failures to `err`) and keeps the
//! counts that decide the overall run status. It never influences scheduling.

use std::io::{self, Write};

use tokio::sync::mpsc::UnboundedReceiver;

use crate::error::TrackError;
use crate::outcome::{Outcome, OutcomeKind};

/// Aggregate of everything reported during a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Tracks whose tasks could not be built.
    pub track_errors: usize,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.succeeded + self.skipped + self.failed
    }

    pub fn any_failed(&self) -> bool {
        self.failed > 0 || self.track_errors > 0
    }
}

pub struct Collector<O: Write, E: Write> {
    out: O,
    err: E,
    summary: RunSummary,
}

impl Collector<io::Stdout, io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> Collector<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self {
            out,
            err,
            summary: RunSummary::default(),
        }
    }

    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }

    /// Reports a track whose tasks could not be built.
    pub fn report_track_error(&mut self, error: &TrackError) {
        self.summary.track_errors += 1;
        if let Err(e) = writeln!(self.err, "{}", error) {
            tracing::warn!("cannot write report line: {}", e);
        }
    }

    pub fn record(&mut self, outcome: &Outcome) {
        let written = match outcome.kind {
            OutcomeKind::Success => {
                self.summary.succeeded += 1;
                writeln!(self.out, "{}", outcome)
            }
            OutcomeKind::Skipped => {
                self.summary.skipped += 1;
                writeln!(self.out, "{}", outcome)
            }
            OutcomeKind::Failed => {
                self.summary.failed += 1;
                writeln!(self.err, "{}", outcome)
            }
        };
        if let Err(e) = written {
            tracing::warn!("cannot write report line: {}", e);
        }
        match outcome.kind {
            OutcomeKind::Failed => tracing::error!(track = outcome.track_id, "{}", outcome.message),
            _ => tracing::info!(track = outcome.track_id, "{}", outcome.message),
        }
    }

    /// Consumes outcomes until every sender is gone.
    pub async fn collect(&mut self, mut outcomes: UnboundedReceiver<Outcome>) -> RunSummary {
        while let Some(outcome) = outcomes.recv().await {
            self.record(&outcome);
        }
        for flushed in [self.out.flush(), self.err.flush()] {
            if let Err(e) = flushed {
                tracing::warn!("cannot flush report: {}", e);
            }
        }
        self.summary
    }
}
