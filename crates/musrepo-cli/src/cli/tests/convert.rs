//! `convert` against a manifest whose full-length track is not there yet.

use crate::cli::commands::{run_convert, RunContext};
use musrepo_core::config::ToolConfig;
use musrepo_core::manifest::{Manifest, Track};

fn context() -> RunContext {
    RunContext {
        tools: ToolConfig::default(),
        manifest: Manifest::from_tracks(vec![Track {
            id: 0,
            kind: String::new(),
            title: "Night Set".to_string(),
            url: "https://example.com/watch?v=1".to_string(),
            end: "4:00".to_string(),
            timestamps: "0:00 Intro\n1:30 Verse".to_string(),
        }]),
        dry_run: false,
    }
}

#[tokio::test]
async fn missing_full_track_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let err = run_convert(&context(), &dir.path().join("full"), &out, false)
        .await
        .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("Night Set.opus"), "{msg}");
    assert!(msg.contains("--skip-missing"), "{msg}");
    assert!(!out.exists());
}

#[tokio::test]
async fn skip_missing_runs_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let summary = run_convert(&context(), &dir.path().join("full"), &out, true)
        .await
        .unwrap();
    assert_eq!(summary.total(), 0);
    assert!(!summary.any_failed());
    assert!(!out.exists());
}
