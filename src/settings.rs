//! Demo settings with persistence
//!
//! Settings are read from `~/.config/tether/settings.toml`

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tether_core::TimeConfig;
use tracing::{info, warn};

/// All demo settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    pub time: TimeConfig,
    pub simulation: SimulationSettings,
}

impl DemoSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tether"))
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load settings from a specific file, falling back to defaults on any failure
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }
}

/// Scripted run parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Number of frames to simulate
    pub frames: u32,
    /// Frames per second fed to the rig
    pub frame_rate: f32,
    /// Profile file (.toml or .json); built-in presets when unset
    pub profiles_path: Option<PathBuf>,
    /// Radius of the target's circular path in meters
    pub path_radius: f32,
    /// Angular speed of the target along its path in radians per second
    pub path_speed: f32,
    /// Switch to the next profile every this many frames (0 = never)
    pub switch_every: u32,
    /// Apply recoil every this many frames (0 = never)
    pub recoil_every: u32,
    /// Vertical recoil strength
    pub recoil: f32,
    /// Peak orbit input in degrees per frame
    pub input_amplitude: f32,
    /// Random input noise in degrees per frame
    pub input_jitter: f32,
    /// Seed for the input noise
    pub seed: u64,
    /// Log the camera pose every this many frames
    pub log_every: u32,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            frames: 1200,
            frame_rate: 60.0,
            profiles_path: None,
            path_radius: 6.0,
            path_speed: 0.4,
            switch_every: 240,
            recoil_every: 90,
            recoil: 0.05,
            input_amplitude: 1.5,
            input_jitter: 0.25,
            seed: 42,
            log_every: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("tether-settings-missing.toml");
        let settings = DemoSettings::load_from(&path);
        assert_eq!(settings.simulation.frames, 1200);
        assert_eq!(settings.time.max_delta_time, 0.25);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let path = std::env::temp_dir().join("tether-settings-partial.toml");
        fs::write(&path, "[simulation]\nframes = 10\nprofiles_path = \"cams.toml\"\n").unwrap();
        let settings = DemoSettings::load_from(&path);
        assert_eq!(settings.simulation.frames, 10);
        assert_eq!(settings.simulation.profiles_path, Some(PathBuf::from("cams.toml")));
        assert_eq!(settings.simulation.frame_rate, 60.0);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn broken_file_gives_defaults() {
        let path = std::env::temp_dir().join("tether-settings-broken.toml");
        fs::write(&path, "[simulation\nframes = ").unwrap();
        let settings = DemoSettings::load_from(&path);
        assert_eq!(settings.simulation.frames, 1200);
        let _ = fs::remove_file(&path);
    }
}
