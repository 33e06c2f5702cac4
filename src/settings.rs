//! Demo settings with persistence
//!
//! Settings are read from `~/.config/joyful/demo.toml`

use std::fs;
use std::path::PathBuf;

use glam::Vec2;
use joyful_core::TimeConfig;
use joyful_game::{CameraConfig, RespawnConfig};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// All demo settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    /// Tuning file (.toml or .json); built-in defaults when unset
    pub tuning_path: Option<PathBuf>,
    pub time: TimeConfig,
    pub respawn: RespawnConfig,
    pub camera: CameraConfig,
    /// Number of rendered frames to simulate
    pub frames: u32,
    /// Real seconds per simulated frame
    pub frame_delta: f32,
    /// Projectiles available at start
    pub projectile_charge: u32,
    /// Falling below this height kills the player
    pub kill_height: f32,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            tuning_path: None,
            time: TimeConfig::default(),
            respawn: RespawnConfig {
                checkpoint: Some(Vec2::new(0.0, 1.0)),
                ..Default::default()
            },
            camera: CameraConfig::default(),
            frames: 900,
            frame_delta: 1.0 / 60.0,
            projectile_charge: 10,
            kill_height: -10.0,
        }
    }
}

impl DemoSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("joyful"))
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("demo.toml"))
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
                warn!("Failed to parse settings: {}, using defaults", e);
                Self::default()
            }),
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_have_checkpoint() {
        let settings = DemoSettings::default();
        assert!(settings.respawn.checkpoint.is_some());
        assert!(settings.tuning_path.is_none());
    }

    #[test]
    fn test_partial_settings_parse() {
        let settings = DemoSettings::parse(
            r#"
            frames = 120
            tuning_path = "tuning.toml"

            [respawn]
            respawn_delay = 2.5
            checkpoint = [4.0, 2.0]
            "#,
        )
        .unwrap();
        assert_eq!(settings.frames, 120);
        assert_eq!(settings.respawn.respawn_delay, 2.5);
        assert_eq!(settings.respawn.checkpoint, Some(Vec2::new(4.0, 2.0)));
        assert_eq!(settings.projectile_charge, 10);
    }
}
