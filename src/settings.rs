//! Run settings
//!
//! Read from `cube_hopper.json` in the working directory, or from the path in
//! `CUBE_HOPPER_SETTINGS`. Missing fields take their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_SPEED, START_SPEED};

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Headless run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed; a fresh one is drawn when absent
    pub seed: Option<u64>,
    /// Starting ground speed (0..=7)
    pub speed: u8,
    /// Frames to simulate before exiting
    pub demo_frames: u32,
    /// Seconds of real time per frame
    pub frame_dt: f32,
    /// Let the autopilot play
    pub autopilot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            speed: START_SPEED,
            demo_frames: 3600,
            frame_dt: 1.0 / 60.0,
            autopilot: true,
        }
    }
}

impl Settings {
    /// File name looked up in the working directory
    pub const FILE_NAME: &'static str = "cube_hopper.json";
    /// Environment variable overriding the settings path
    pub const PATH_ENV: &'static str = "CUBE_HOPPER_SETTINGS";

    /// Parse settings from a JSON file
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings =
            serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(settings.clamped())
    }

    /// Load from the configured path, falling back to defaults
    pub fn load() -> Self {
        let path = std::env::var_os(Self::PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(Self::FILE_NAME));

        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    fn clamped(mut self) -> Self {
        self.speed = self.speed.min(MAX_SPEED);
        if !(self.frame_dt.is_finite() && self.frame_dt >= 0.0) {
            self.frame_dt = Self::default().frame_dt;
        }
        self
    }
}
