use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// External tools and file extension used when composing task commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Acquisition tool (yt-dlp compatible CLI).
    pub acquire_tool: String,
    /// Transcode tool (ffmpeg compatible CLI).
    pub transcode_tool: String,
    /// Extension of local audio files, including the dot.
    pub extension: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            acquire_tool: "yt-dlp".to_string(),
            transcode_tool: "ffmpeg".to_string(),
            extension: ".opus".to_string(),
        }
    }
}

/// Global configuration loaded from `~/.config/musrepo/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusrepoConfig {
    #[serde(default)]
    pub tools: ToolConfig,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("musrepo")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<MusrepoConfig> {
    load_or_init_at(&config_path()?)
}

pub fn load_or_init_at(path: &Path) -> Result<MusrepoConfig> {
    if !path.exists() {
        let default_cfg = MusrepoConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: MusrepoConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
