//! Shell stand-ins for the acquisition and transcode tools.
//!
//! Both append their arguments to a shared log so tests can count
//! invocations. Like an audio-extracting downloader, the acquire tool leaves
//! only `<template>.opus` behind; the transcode tool refuses to run without
//! its input and fails for any output containing `FAIL`.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use musrepo_core::config::ToolConfig;

pub struct FakeTools {
    pub config: ToolConfig,
    pub log: PathBuf,
}

impl FakeTools {
    /// Number of tool invocations recorded so far.
    pub fn invocations(&self) -> usize {
        fs::read_to_string(&self.log)
            .map(|s| s.lines().count())
            .unwrap_or(0)
    }
}

fn write_script(path: &Path, body: &str) {
    fs::write(path, format!("#!/bin/sh\n{}", body)).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

pub fn install(dir: &Path) -> FakeTools {
    let log = dir.join("invocations.log");
    let acquire = dir.join("fake-yt-dlp");
    let transcode = dir.join("fake-ffmpeg");

    write_script(
        &acquire,
        &format!(
            r#"echo "acquire $*" >> "{log}"
: > "$4.opus"
"#,
            log = log.display()
        ),
    );
    write_script(
        &transcode,
        &format!(
            r#"echo "transcode $*" >> "{log}"
in="$5"
[ -f "$in" ] || {{ echo "missing input $in" >&2; exit 1; }}
for last; do :; done
case "$last" in *FAIL*) echo "cannot cut $last" >&2; exit 2;; esac
: > "$last"
"#,
            log = log.display()
        ),
    );

    FakeTools {
        config: ToolConfig {
            acquire_tool: acquire.to_string_lossy().into_owned(),
            transcode_tool: transcode.to_string_lossy().into_owned(),
            extension: ".opus".to_string(),
        },
        log,
    }
}
