//! Tuning parameters and validation
//!
//! Values are authored in a TOML or JSON file and validated once before a
//! controller is built. Fields left out of a file keep the defaults below.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::info;

use joyful_physics::GROUND_LAYER;

use super::GravityCurve;
use crate::error::ConfigError;

/// Motion tuning for one character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningParameters {
    /// Grounded run speed (units per second at full stick)
    pub move_speed: f32,
    /// Vertical velocity set on jump
    pub jump_velocity: f32,
    /// Gravity subtracted from vertical velocity each tick, before the curve
    pub base_gravity: f32,
    /// Multiplier over normalized fall time
    pub gravity_curve: GravityCurve,
    /// Fall time at which the curve reaches its end
    pub seconds_to_reach_max_gravity: f32,
    /// Gravity multiplier while ascending with jump held
    pub jump_gravity_reduction: f32,
    /// Vertical velocity at or below which the character counts as falling
    pub high_gravity_threshold_velocity: f32,
    /// Most negative vertical velocity allowed
    pub terminal_velocity: f32,
    /// Lerp factor pulling over-cap airborne speed back to the cap
    pub aerial_drag: f32,
    /// Lerp factor steering airborne speed toward the stick
    pub aerial_drift: f32,
    /// Airborne horizontal speed cap
    pub max_aerial_drift: f32,
    /// Speed of the forced knockback velocity on both axes
    pub knockback_magnitude: f32,
    /// How long a knockback overrides movement (seconds)
    pub knockback_duration: f32,
    /// Ladder climb speed at full stick
    pub climb_speed: f32,
    /// Radius of the ground sensor circle
    pub ground_check_radius: f32,
    /// Offset from the body origin to the ground sensor
    pub ground_check_offset: Vec2,
    /// Layers that count as ground
    pub ground_mask: u32,
    /// Minimum interval between projectile shots (seconds)
    pub shot_delay: f32,
    /// Offset from the body origin to the projectile spawn point
    pub fire_point_offset: Vec2,
    /// The body's normal gravity scale, restored when leaving a ladder
    pub body_gravity_scale: f32,
}

impl Default for TuningParameters {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            jump_velocity: 10.0,
            base_gravity: 0.75,
            gravity_curve: GravityCurve::default(),
            seconds_to_reach_max_gravity: 1.0,
            jump_gravity_reduction: 0.5,
            high_gravity_threshold_velocity: 3.0,
            terminal_velocity: -20.0,
            aerial_drag: 0.05,
            aerial_drift: 0.1,
            max_aerial_drift: 5.0,
            knockback_magnitude: 5.0,
            knockback_duration: 0.2,
            climb_speed: 3.0,
            ground_check_radius: 0.1,
            ground_check_offset: Vec2::new(0.0, -0.5),
            ground_mask: GROUND_LAYER,
            shot_delay: 0.5,
            fire_point_offset: Vec2::new(0.4, 0.0),
            body_gravity_scale: 1.0,
        }
    }
}

impl TuningParameters {
    /// Check every field, returning the first violation found
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scalars = [
            ("move_speed", self.move_speed),
            ("jump_velocity", self.jump_velocity),
            ("base_gravity", self.base_gravity),
            ("seconds_to_reach_max_gravity", self.seconds_to_reach_max_gravity),
            ("jump_gravity_reduction", self.jump_gravity_reduction),
            ("high_gravity_threshold_velocity", self.high_gravity_threshold_velocity),
            ("terminal_velocity", self.terminal_velocity),
            ("aerial_drag", self.aerial_drag),
            ("aerial_drift", self.aerial_drift),
            ("max_aerial_drift", self.max_aerial_drift),
            ("knockback_magnitude", self.knockback_magnitude),
            ("knockback_duration", self.knockback_duration),
            ("climb_speed", self.climb_speed),
            ("ground_check_radius", self.ground_check_radius),
            ("ground_check_offset.x", self.ground_check_offset.x),
            ("ground_check_offset.y", self.ground_check_offset.y),
            ("shot_delay", self.shot_delay),
            ("fire_point_offset.x", self.fire_point_offset.x),
            ("fire_point_offset.y", self.fire_point_offset.y),
            ("body_gravity_scale", self.body_gravity_scale),
        ];
        for (field, value) in scalars {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }

        positive("seconds_to_reach_max_gravity", self.seconds_to_reach_max_gravity)?;
        positive("ground_check_radius", self.ground_check_radius)?;
        if self.terminal_velocity >= 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "terminal_velocity",
                value: self.terminal_velocity,
                reason: "must be negative",
            });
        }
        unit_interval("aerial_drag", self.aerial_drag)?;
        unit_interval("aerial_drift", self.aerial_drift)?;
        non_negative("move_speed", self.move_speed)?;
        non_negative("base_gravity", self.base_gravity)?;
        non_negative("jump_gravity_reduction", self.jump_gravity_reduction)?;
        non_negative("max_aerial_drift", self.max_aerial_drift)?;
        non_negative("knockback_magnitude", self.knockback_magnitude)?;
        non_negative("knockback_duration", self.knockback_duration)?;
        non_negative("climb_speed", self.climb_speed)?;
        non_negative("shot_delay", self.shot_delay)?;
        non_negative("body_gravity_scale", self.body_gravity_scale)?;

        Ok(())
    }

    /// Parse tuning from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let tuning: Self = toml::from_str(content)
            .map_err(|e| ConfigError::ParseFailed("<inline>".into(), e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a `.toml` or `.json` file and validate it
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed(path.to_path_buf(), e))?;

        let tuning: Self = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&content)
                .map_err(|e| ConfigError::ParseFailed(path.to_path_buf(), e.to_string()))?,
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseFailed(path.to_path_buf(), e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };

        tuning.validate()?;
        info!("Loaded tuning from {:?}", path);
        Ok(tuning)
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value <= 0.0 {
        return Err(ConfigError::OutOfRange {
            field,
            value,
            reason: "must be greater than zero",
        });
    }
    Ok(())
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value < 0.0 {
        return Err(ConfigError::OutOfRange {
            field,
            value,
            reason: "must not be negative",
        });
    }
    Ok(())
}

fn unit_interval(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::OutOfRange {
            field,
            value,
            reason: "must be within [0, 1]",
        });
    }
    Ok(())
}
