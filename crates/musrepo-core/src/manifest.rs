//! Track manifest: the declarative list of recordings to process.
//!
//! Stored as YAML with one entry per track under `Music`:
//!
//! ```yaml
//! Music:
//!   - Type: album
//!     Title: Some Live Set
//!     Url: https://example.com/watch?v=abc
//!     End: "42:00"
//!     Timestamps: |
//!       0:00 Intro
//!       3:15 First Song
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::ManifestError;

/// One manifest entry. `id` is its 0-based position, assigned at load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub id: usize,
    pub kind: String,
    pub title: String,
    pub url: String,
    pub end: String,
    pub timestamps: String,
}

#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(rename = "Music", default)]
    music: Vec<RawTrack>,
}

#[derive(Debug, Deserialize)]
struct RawTrack {
    #[serde(rename = "Type", default)]
    kind: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Url")]
    url: String,
    #[serde(rename = "End", default)]
    end: String,
    #[serde(rename = "Timestamps", default)]
    timestamps: String,
}

/// Loaded manifest; tracks are read-only after load.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    tracks: Vec<Track>,
}

impl Manifest {
    /// Reads and parses the manifest at `path`.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let data = fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest = Self::parse(&data).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(
            path = %path.display(),
            tracks = manifest.tracks.len(),
            "loaded manifest"
        );
        Ok(manifest)
    }

    /// Parses manifest text, assigning each track its position as id.
    pub fn parse(data: &str) -> Result<Self, serde_yaml::Error> {
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: RawManifest = serde_yaml::from_str(data)?;
        let tracks = raw
            .music
            .into_iter()
            .enumerate()
            .map(|(id, t)| Track {
                id,
                kind: t.kind,
                title: t.title,
                url: t.url,
                end: t.end,
                timestamps: t.timestamps,
            })
            .collect();
        Ok(Self { tracks })
    }

    pub fn from_tracks(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }
}
