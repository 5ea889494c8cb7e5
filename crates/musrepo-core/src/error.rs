//! Error taxonomy for manifest loading, task construction, and task execution.

use std::path::PathBuf;

use thiserror::Error;

/// Manifest could not be read or parsed. Fatal: nothing is built.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("cannot read manifest {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed manifest {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Timestamp block of one track is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SegmentParseError {
    #[error("timestamp block is empty")]
    Empty,
    #[error("no time found in line: {line:?}")]
    NoTimestamp { line: String },
    #[error("line has nothing left after removing its time: {line:?}")]
    EmptyLabel { line: String },
}

/// Sanitization produced nothing usable as a path component.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("path component is empty after sanitizing {original:?}")]
    Empty { original: String },
}

/// Why one track's tasks could not be built. Scoped to that track only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackErrorKind {
    #[error(transparent)]
    Segments(#[from] SegmentParseError),
    #[error(transparent)]
    Path(#[from] PathError),
    #[error("invalid source locator {locator:?}: {reason}")]
    Locator { locator: String, reason: String },
    #[error("title {title:?} is already used by track {first}")]
    DuplicateTitle { title: String, first: usize },
}

/// Task construction failure for a single track.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("track {track_id} ({title}): {kind}")]
pub struct TrackError {
    pub track_id: usize,
    pub title: String,
    pub kind: TrackErrorKind,
}

/// External process did not complete successfully. Never propagated: the
/// executor turns it into a failed outcome.
#[derive(Debug, Error)]
pub enum TaskExecutionError {
    #[error("failed: {command}\n{stderr}")]
    NonZeroExit {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
    #[error("failed to start: {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot create directory {}: {source}", .dir.display())]
    CreateDir {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("task panicked: {command}")]
    Panicked { command: String },
}
