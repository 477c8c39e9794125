//! Game settings
//!
//! Loaded from an optional JSON file. Every field has a default, so a partial
//! file only overrides what it names.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::{Rules, Tuning};

/// Settings file looked up in the working directory when none is given
pub const DEFAULT_SETTINGS_FILE: &str = "flapper.json";

/// Asset locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub background: PathBuf,
    /// Flap animation, in order
    pub bird_frames: Vec<PathBuf>,
    pub pipe: PathBuf,
    pub font: PathBuf,
    pub font_size: u16,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            background: PathBuf::from("res/sprites/background.sprite"),
            bird_frames: (1..=BIRD_FRAME_COUNT)
                .map(|i| PathBuf::from(format!("res/sprites/bird_frame_{}.sprite", i)))
                .collect(),
            pipe: PathBuf::from("res/sprites/pipe.sprite"),
            font: PathBuf::from("res/fonts/flappy.font"),
            font_size: 50,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Simulation period
    pub tick_ms: u64,
    /// How long the title stays up before play starts
    pub title_ms: u64,
    /// Pipe RNG seed; random per launch when absent
    pub seed: Option<u64>,
    /// Write logs here instead of stderr. Without it, anything at or above
    /// the active filter (`warn` unless `RUST_LOG` says otherwise) is written
    /// to stderr over the game screen.
    pub log_file: Option<PathBuf>,
    pub assets: AssetPaths,
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            title_ms: TITLE_MS,
            seed: None,
            log_file: None,
            assets: AssetPaths::default(),
            tuning: Tuning::default(),
        }
    }
}

/// Where loaded settings came from.
///
/// Logging is configured from the settings themselves, so `load` cannot log
/// while it runs. The caller reports this once its logger is installed.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsSource {
    File(PathBuf),
    /// No settings file
    Defaults,
    /// The file exists but was rejected; defaults are used instead
    Invalid { path: PathBuf, reason: String },
}

impl SettingsSource {
    pub fn log(&self) {
        match self {
            SettingsSource::Invalid { .. } => log::warn!("{}", self),
            _ => log::info!("{}", self),
        }
    }
}

impl fmt::Display for SettingsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsSource::File(path) => write!(f, "Loaded settings from {}", path.display()),
            SettingsSource::Defaults => write!(f, "Using default settings"),
            SettingsSource::Invalid { path, reason } => {
                write!(f, "Ignoring {}: {}", path.display(), reason)
            }
        }
    }
}

impl Settings {
    /// Load settings from `path`, or from `flapper.json` if present.
    /// Falls back to defaults when the file is missing or unreadable.
    pub fn load(path: Option<&Path>) -> (Self, SettingsSource) {
        let path = path.unwrap_or(Path::new(DEFAULT_SETTINGS_FILE));
        match fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => (settings, SettingsSource::File(path.to_path_buf())),
                Err(e) => (
                    Self::default(),
                    SettingsSource::Invalid {
                        path: path.to_path_buf(),
                        reason: e.to_string(),
                    },
                ),
            },
            Err(_) => (Self::default(), SettingsSource::Defaults),
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Simulation period, never zero
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    pub fn title_duration(&self) -> Duration {
        Duration::from_millis(self.title_ms)
    }

    /// Durations resolved to ticks for the simulation
    pub fn rules(&self) -> Rules {
        self.tuning.rules(self.tick_ms)
    }

    /// Configured seed, or one derived from the clock
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}
