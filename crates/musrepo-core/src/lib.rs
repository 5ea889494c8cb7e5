//! Task-graph engine for musrepo: turns a track manifest into acquire and
//! transcode tasks and runs them concurrently with skip-if-exists semantics.

pub mod config;
pub mod logging;

pub mod collector;
pub mod error;
pub mod executor;
pub mod manifest;
pub mod outcome;
pub mod pipeline;
pub mod sanitize;
pub mod segmenter;
pub mod task;
