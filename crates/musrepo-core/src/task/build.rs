//! Task construction from manifest tracks.
//!
//! Construction errors are scoped to the offending track: they are collected
//! next to the tasks that could be built instead of aborting the whole plan.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use url::Url;

use crate::config::ToolConfig;
use crate::error::{TrackError, TrackErrorKind};
use crate::manifest::Track;
use crate::sanitize::sanitize;
use crate::segmenter;

use super::{Task, TaskInput, TaskKind};

/// Tasks of one stage plus the tracks that could not be turned into tasks.
#[derive(Debug, Clone, Default)]
pub struct TaskSet {
    pub tasks: Vec<Task>,
    pub errors: Vec<TrackError>,
}

/// Both stages of a full run.
#[derive(Debug, Clone, Default)]
pub struct TaskPlan {
    pub acquire: Vec<Task>,
    pub transcode: Vec<Task>,
    pub errors: Vec<TrackError>,
}

impl TaskPlan {
    pub fn acquire_only(set: TaskSet) -> Self {
        Self {
            acquire: set.tasks,
            transcode: Vec::new(),
            errors: set.errors,
        }
    }

    pub fn transcode_only(set: TaskSet) -> Self {
        Self {
            acquire: Vec::new(),
            transcode: set.tasks,
            errors: set.errors,
        }
    }

    pub fn len(&self) -> usize {
        self.acquire.len() + self.transcode.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Acquire tasks first, then Transcode tasks.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.acquire.iter().chain(self.transcode.iter())
    }
}

/// Where a track's audio comes from.
enum Source {
    Remote,
    Local(PathBuf),
}

fn track_error(track: &Track, kind: impl Into<TrackErrorKind>) -> TrackError {
    TrackError {
        track_id: track.id,
        title: track.title.clone(),
        kind: kind.into(),
    }
}

fn source_of(track: &Track) -> Result<Source, TrackError> {
    let locator_error = |reason: String| {
        track_error(
            track,
            TrackErrorKind::Locator {
                locator: track.url.clone(),
                reason,
            },
        )
    };
    let url = Url::parse(track.url.trim()).map_err(|e| locator_error(e.to_string()))?;
    if url.scheme() == "file" {
        let path = url
            .to_file_path()
            .map_err(|()| locator_error("not a local file path".to_string()))?;
        return Ok(Source::Local(path));
    }
    Ok(Source::Remote)
}

/// Tracks whose sanitized title is still free, in manifest order.
///
/// Every track owns `out_root/<title>`, so a later track whose title sanitizes
/// to one already taken gets no tasks. Titles that fail to sanitize are let
/// through; the stage builders report those.
fn claim_titles(tracks: &[Track]) -> (Vec<&Track>, Vec<TrackError>) {
    let mut owners: HashMap<String, usize> = HashMap::new();
    let mut claimed = Vec::with_capacity(tracks.len());
    let mut errors = Vec::new();
    for track in tracks {
        if let Ok(title) = sanitize(&track.title) {
            match owners.entry(title) {
                Entry::Occupied(owner) => {
                    errors.push(track_error(
                        track,
                        TrackErrorKind::DuplicateTitle {
                            title: owner.key().clone(),
                            first: *owner.get(),
                        },
                    ));
                    continue;
                }
                Entry::Vacant(slot) => {
                    slot.insert(track.id);
                }
            }
        }
        claimed.push(track);
    }
    (claimed, errors)
}

fn stage_set(errors: Vec<TrackError>) -> TaskSet {
    for e in &errors {
        tracing::warn!("{}", e);
    }
    TaskSet {
        tasks: Vec::new(),
        errors,
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn with_extension(name: &str, extension: &str) -> String {
    format!("{}{}", name, extension)
}

fn acquire_task(track: &Track, out_root: &Path, tools: &ToolConfig) -> Result<Option<Task>, TrackError> {
    if let Source::Local(_) = source_of(track)? {
        return Ok(None);
    }
    let title = sanitize(&track.title).map_err(|e| track_error(track, e))?;
    let output = out_root.join(title);
    let locator = track.url.trim().to_string();
    let argv = vec![
        tools.acquire_tool.clone(),
        "-x".to_string(),
        "--no-progress".to_string(),
        "-o".to_string(),
        path_arg(&output),
        locator.clone(),
    ];
    Ok(Some(Task {
        kind: TaskKind::Acquire,
        track_id: track.id,
        input: TaskInput::Locator(locator),
        output,
        argv,
    }))
}

fn transcode_tasks(
    track: &Track,
    in_root: &Path,
    out_root: &Path,
    tools: &ToolConfig,
) -> Result<Vec<Task>, TrackError> {
    let source = source_of(track)?;
    let title = sanitize(&track.title).map_err(|e| track_error(track, e))?;
    let segments =
        segmenter::split(&track.timestamps, &track.end).map_err(|e| track_error(track, e))?;

    let input = match source {
        Source::Local(path) => path,
        Source::Remote => in_root.join(with_extension(&title, &tools.extension)),
    };
    let input_arg = path_arg(&input);
    let track_dir = out_root.join(&title);

    segments
        .iter()
        .map(|segment| -> Result<Task, TrackError> {
            let label = sanitize(&segment.label).map_err(|e| track_error(track, e))?;
            let output = track_dir.join(with_extension(&label, &tools.extension));
            let argv = vec![
                tools.transcode_tool.clone(),
                "-hide_banner".to_string(),
                "-loglevel".to_string(),
                "error".to_string(),
                "-i".to_string(),
                input_arg.clone(),
                "-ss".to_string(),
                segment.start.clone(),
                "-to".to_string(),
                segment.end.clone(),
                "-c".to_string(),
                "copy".to_string(),
                path_arg(&output),
            ];
            Ok(Task {
                kind: TaskKind::Transcode,
                track_id: track.id,
                input: TaskInput::File(input.clone()),
                output,
                argv,
            })
        })
        .collect()
}

/// One Acquire task per track with a remote source locator.
pub fn build_acquire_tasks(tracks: &[Track], out_root: &Path, tools: &ToolConfig) -> TaskSet {
    let (tracks, duplicates) = claim_titles(tracks);
    let mut set = stage_set(duplicates);
    for track in tracks {
        match acquire_task(track, out_root, tools) {
            Ok(Some(task)) => set.tasks.push(task),
            Ok(None) => tracing::debug!(track = track.id, "local source, nothing to acquire"),
            Err(e) => {
                tracing::warn!("{}", e);
                set.errors.push(e);
            }
        }
    }
    set
}

/// One Transcode task per segment of every track.
pub fn build_transcode_tasks(
    tracks: &[Track],
    in_root: &Path,
    out_root: &Path,
    tools: &ToolConfig,
) -> TaskSet {
    let (tracks, duplicates) = claim_titles(tracks);
    let mut set = stage_set(duplicates);
    for track in tracks {
        match transcode_tasks(track, in_root, out_root, tools) {
            Ok(tasks) => set.tasks.extend(tasks),
            Err(e) => {
                tracing::warn!("{}", e);
                set.errors.push(e);
            }
        }
    }
    set
}

/// Both stages; a track failing in both stages for the same reason is reported once.
pub fn build_plan(tracks: &[Track], in_root: &Path, out_root: &Path, tools: &ToolConfig) -> TaskPlan {
    let acquire = build_acquire_tasks(tracks, out_root, tools);
    let transcode = build_transcode_tasks(tracks, in_root, out_root, tools);

    let mut errors = acquire.errors;
    for e in transcode.errors {
        if !errors.contains(&e) {
            errors.push(e);
        }
    }
    errors.sort_by_key(|e| e.track_id);

    TaskPlan {
        acquire: acquire.tasks,
        transcode: transcode.tasks,
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PathError, SegmentParseError};
    use std::collections::HashSet;

    fn track(id: usize, title: &str, url: &str, timestamps: &str, end: &str) -> Track {
        Track {
            id,
            kind: String::new(),
            title: title.to_string(),
            url: url.to_string(),
            end: end.to_string(),
            timestamps: timestamps.to_string(),
        }
    }

    fn remote() -> Track {
        track(
            0,
            "My:Track?",
            "https://example.com/watch?v=abc",
            "0:00 Intro\n1:30 Verse\n3:10 Chorus",
            "4:00",
        )
    }

    #[test]
    fn acquire_argv_for_remote_track() {
        let set = build_acquire_tasks(&[remote()], Path::new("/out"), &ToolConfig::default());
        assert!(set.errors.is_empty());
        assert_eq!(set.tasks.len(), 1);
        let task = &set.tasks[0];
        assert_eq!(task.kind, TaskKind::Acquire);
        assert_eq!(task.output, PathBuf::from("/out/MyTrack"));
        assert_eq!(
            task.argv,
            vec![
                "yt-dlp",
                "-x",
                "--no-progress",
                "-o",
                "/out/MyTrack",
                "https://example.com/watch?v=abc"
            ]
        );
    }

    #[test]
    fn file_scheme_has_no_acquire_task() {
        let local = track(0, "Tape", "file:///music/tape.opus", "0:00 A\n1:00 B", "2:00");
        let set = build_acquire_tasks(&[local.clone()], Path::new("/out"), &ToolConfig::default());
        assert!(set.tasks.is_empty());
        assert!(set.errors.is_empty());

        let set = build_transcode_tasks(&[local], Path::new("/in"), Path::new("/out"), &ToolConfig::default());
        assert_eq!(set.tasks.len(), 2);
        for task in &set.tasks {
            assert_eq!(task.input, TaskInput::File(PathBuf::from("/music/tape.opus")));
            assert_eq!(task.argv[5], "/music/tape.opus");
        }
    }

    #[test]
    fn transcode_argv_and_paths() {
        let set = build_transcode_tasks(&[remote()], Path::new("/in"), Path::new("/out"), &ToolConfig::default());
        assert!(set.errors.is_empty());
        assert_eq!(set.tasks.len(), 3);
        let first = &set.tasks[0];
        assert_eq!(first.kind, TaskKind::Transcode);
        assert_eq!(first.input, TaskInput::File(PathBuf::from("/in/MyTrack.opus")));
        assert_eq!(first.output, PathBuf::from("/out/MyTrack/000 Intro.opus"));
        assert_eq!(
            first.argv,
            vec![
                "ffmpeg",
                "-hide_banner",
                "-loglevel",
                "error",
                "-i",
                "/in/MyTrack.opus",
                "-ss",
                "0:00",
                "-to",
                "1:30",
                "-c",
                "copy",
                "/out/MyTrack/000 Intro.opus"
            ]
        );
        assert_eq!(set.tasks[2].argv[7], "3:10");
        assert_eq!(set.tasks[2].argv[9], "4:00");
    }

    #[test]
    fn custom_tools_and_extension() {
        let tools = ToolConfig {
            acquire_tool: "./yt-dlp".to_string(),
            transcode_tool: "/opt/ffmpeg".to_string(),
            extension: ".m4a".to_string(),
        };
        let plan = build_plan(&[remote()], Path::new("/in"), Path::new("/out"), &tools);
        assert_eq!(plan.acquire[0].argv[0], "./yt-dlp");
        assert_eq!(plan.transcode[0].argv[0], "/opt/ffmpeg");
        assert_eq!(plan.transcode[0].input.file(), Some(Path::new("/in/MyTrack.m4a")));
        assert_eq!(plan.transcode[1].output, PathBuf::from("/out/MyTrack/001 Verse.m4a"));
    }

    #[test]
    fn output_paths_are_unique() {
        let tracks = vec![
            remote(),
            track(1, "Other", "https://example.com/2", "0:00 Intro\n1:00 Intro", "2:00"),
        ];
        let plan = build_plan(&tracks, Path::new("/in"), Path::new("/out"), &ToolConfig::default());
        let outputs: HashSet<&PathBuf> = plan.tasks().map(|t| &t.output).collect();
        assert_eq!(outputs.len(), plan.len());
    }

    #[test]
    fn colliding_titles_keep_first_track() {
        let tracks = vec![
            track(0, "A:B", "https://example.com/1", "0:00 Intro\n1:00 Outro", "2:00"),
            track(1, "AB", "https://example.com/2", "0:00 Intro\n1:00 Outro", "2:00"),
            track(2, "A:B", "file:///music/ab.opus", "0:00 Intro", "2:00"),
            track(3, "Other", "https://example.com/3", "0:00 Intro", "2:00"),
        ];
        let plan = build_plan(&tracks, Path::new("/in"), Path::new("/out"), &ToolConfig::default());

        let outputs: HashSet<&PathBuf> = plan.tasks().map(|t| &t.output).collect();
        assert_eq!(outputs.len(), plan.len());
        assert!(plan.tasks().all(|t| t.track_id == 0 || t.track_id == 3));
        assert_eq!(plan.acquire.len(), 2);
        assert_eq!(plan.transcode.len(), 3);

        let duplicate = |id: usize| TrackError {
            track_id: id,
            title: tracks[id].title.clone(),
            kind: TrackErrorKind::DuplicateTitle {
                title: "AB".to_string(),
                first: 0,
            },
        };
        assert_eq!(plan.errors, vec![duplicate(1), duplicate(2)]);
    }

    #[test]
    fn colliding_titles_rejected_per_stage() {
        let tracks = vec![
            track(0, "Same", "https://example.com/1", "0:00 A", "1:00"),
            track(1, "Same", "https://example.com/2", "0:00 A", "1:00"),
        ];
        let acquire = build_acquire_tasks(&tracks, Path::new("/out"), &ToolConfig::default());
        assert_eq!(acquire.tasks.len(), 1);
        assert_eq!(acquire.errors.len(), 1);
        assert_eq!(acquire.errors[0].track_id, 1);

        let transcode =
            build_transcode_tasks(&tracks, Path::new("/in"), Path::new("/out"), &ToolConfig::default());
        assert_eq!(transcode.tasks.len(), 1);
        assert_eq!(transcode.tasks[0].track_id, 0);
        assert_eq!(transcode.errors.len(), 1);
    }

    #[test]
    fn bad_timestamps_isolated_to_track() {
        let tracks = vec![
            track(0, "Broken", "https://example.com/1", "no times here", "1:00"),
            Track { id: 1, ..remote() },
        ];
        let plan = build_plan(&tracks, Path::new("/in"), Path::new("/out"), &ToolConfig::default());
        assert_eq!(plan.acquire.len(), 2);
        assert_eq!(plan.transcode.len(), 3);
        assert!(plan.transcode.iter().all(|t| t.track_id == 1));
        assert_eq!(plan.errors.len(), 1);
        assert_eq!(plan.errors[0].track_id, 0);
        assert_eq!(
            plan.errors[0].kind,
            TrackErrorKind::Segments(SegmentParseError::NoTimestamp {
                line: "no times here".to_string()
            })
        );
    }

    #[test]
    fn empty_title_reported_once() {
        let tracks = vec![
            track(0, "???", "https://example.com/1", "0:00 A", "1:00"),
            track(1, "Fine", "https://example.com/2", "0:00 A", "1:00"),
        ];
        let plan = build_plan(&tracks, Path::new("/in"), Path::new("/out"), &ToolConfig::default());
        assert_eq!(plan.errors.len(), 1);
        assert_eq!(
            plan.errors[0].kind,
            TrackErrorKind::Path(PathError::Empty {
                original: "???".to_string()
            })
        );
        assert_eq!(plan.acquire.len(), 1);
        assert_eq!(plan.transcode.len(), 1);
    }

    #[test]
    fn unparseable_locator() {
        let tracks = vec![track(0, "Nowhere", "not a url", "0:00 A", "1:00")];
        let plan = build_plan(&tracks, Path::new("/in"), Path::new("/out"), &ToolConfig::default());
        assert!(plan.is_empty());
        assert_eq!(plan.errors.len(), 1);
        assert!(matches!(plan.errors[0].kind, TrackErrorKind::Locator { .. }));
    }
}
