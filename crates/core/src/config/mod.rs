use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::Result;

/// Top-level configuration structure for the application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub playlist: PlaylistConfig,
    pub playback: PlaybackConfig,
}

impl AppConfig {
    /// Reads a JSON configuration file. Absent fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Loads `path` when one is given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

/// Where the playlist lives and how its relative paths are resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaylistConfig {
    pub path: PathBuf,
    /// Directory that relative `url` and `lrc` entries are resolved against
    /// (see [`Playlist::with_media_base`](crate::Playlist::with_media_base)
    /// and [`FileTranscriptSource`](crate::FileTranscriptSource)). Falls back
    /// to the playlist file's own directory.
    pub base_dir: Option<PathBuf>,
}

impl Default for PlaylistConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("songs.json"),
            base_dir: None,
        }
    }
}

impl PlaylistConfig {
    pub fn resolved_base_dir(&self) -> PathBuf {
        match &self.base_dir {
            Some(dir) => dir.clone(),
            None => self
                .path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        }
    }
}

/// Configuration specific to playback behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Start playing as soon as a song finishes loading.
    pub autoplay: bool,
    /// Restart the current song when it ends instead of advancing.
    pub repeat: bool,
    /// Interval between simulated position updates, in seconds.
    pub tick_seconds: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            autoplay: true,
            repeat: false,
            tick_seconds: 0.25,
        }
    }
}
