//! Settings for the bloom splash, read from a TOML file in the platform
//! config directory.
//!
//! ```toml
//! title = "Delicious Planet"
//! tagline = "Bite into the Wild"
//! target = "2026-03-01T00:00:00"
//! accent = "olive"
//! speed = "normal"
//! show_leaves = true
//! frame_ms = 33
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use bloom_core::{AccentTheme, AnimationSpeed};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "config.toml";
const LOG_FILE: &str = "bloom.log";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config at {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize config")]
    Serialize(#[from] toml::ser::Error),
    #[error("failed to write config at {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("launch time {target} does not exist in the local time zone")]
    NonexistentLocalTime { target: NaiveDateTime },
}

fn default_title() -> String {
    "Delicious Planet".to_string()
}

fn default_tagline() -> String {
    "Bite into the Wild".to_string()
}

fn default_target() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

const fn default_true() -> bool {
    true
}

const fn default_frame_ms() -> u64 {
    33
}

/// User-facing settings. Every field falls back to its default when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_tagline")]
    pub tagline: String,
    /// Launch instant as a wall-clock time in the local zone.
    #[serde(default = "default_target")]
    pub target: NaiveDateTime,
    /// Overrides the launch-date badge, which otherwise shows `target`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(default)]
    pub accent: AccentTheme,
    #[serde(default)]
    pub speed: AnimationSpeed,
    #[serde(default = "default_true")]
    pub show_leaves: bool,
    /// Input poll timeout between frames.
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: default_title(),
            tagline: default_tagline(),
            target: default_target(),
            badge: None,
            accent: AccentTheme::default(),
            speed: AnimationSpeed::default(),
            show_leaves: true,
            frame_ms: default_frame_ms(),
        }
    }
}

impl Config {
    /// Load from the platform config file, or defaults if there is none.
    pub fn load() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::warn!("no config directory available, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load from `path`. A missing file yields defaults; an unreadable or
    /// malformed one is an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file absent, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| {
            tracing::warn!(path = %path.display(), error = %source, "failed to read config");
            ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let config = toml::from_str(&content).map_err(|source| {
            tracing::warn!(path = %path.display(), error = %source, "failed to parse config");
            ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })?;
        tracing::info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Write to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let serialized = toml::to_string_pretty(self)?;
        fs::write(path, serialized).map_err(write_err)?;
        tracing::debug!(path = %path.display(), "config saved");
        Ok(())
    }

    /// The launch instant, interpreting `target` in `tz`.
    ///
    /// An ambiguous wall time (clocks going back) resolves to the earlier
    /// instant. A wall time skipped by a DST jump is an error.
    pub fn resolve_target<Tz: TimeZone>(&self, tz: &Tz) -> Result<DateTime<Utc>, ConfigError> {
        tz.from_local_datetime(&self.target)
            .earliest()
            .map(|local| local.with_timezone(&Utc))
            .ok_or(ConfigError::NonexistentLocalTime {
                target: self.target,
            })
    }

    /// Text of the launch-date badge, e.g. `01 Mar 2026`.
    pub fn badge_text(&self) -> String {
        self.badge
            .clone()
            .unwrap_or_else(|| self.target.format("%d %b %Y").to_string())
    }

    /// Input poll timeout, never zero.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms.max(1))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "bloom")
}

/// Location of `config.toml` in the platform config directory.
pub fn config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Location of the log file in the platform data directory.
pub fn log_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join(LOG_FILE))
}
