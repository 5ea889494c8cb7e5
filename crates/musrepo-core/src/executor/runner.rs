//! External process invocation.

use std::io;
use std::process::{Command, Stdio};

/// Result of a process that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub success: bool,
    /// Exit code; `None` if the process was killed by a signal.
    pub code: Option<i32>,
    pub stderr: String,
}

/// Runs one argument vector to completion. Called from a blocking thread.
pub trait CommandRunner: Send + Sync + 'static {
    fn run(&self, argv: &[String]) -> io::Result<ProcessOutput>;
}

/// Spawns real processes via `std::process::Command`, capturing stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, argv: &[String]) -> io::Result<ProcessOutput> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty argument vector"))?;
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()?;
        Ok(ProcessOutput {
            success: output.status.success(),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
        })
    }
}
