//! Side-scrolling follow camera

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::level::CameraFollow;

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Offset from the followed target to the camera center
    pub offset: Vec2,
    /// Follow interpolation smoothing (0-1, lower = smoother)
    pub smoothing: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            offset: Vec2::new(0.0, 1.0),
            smoothing: 0.15,
        }
    }
}

/// Camera that eases toward a target while following is enabled
#[derive(Debug, Clone)]
pub struct FollowCamera {
    pub config: CameraConfig,
    position: Vec2,
    following: bool,
}

impl FollowCamera {
    pub fn new(config: CameraConfig, position: Vec2) -> Self {
        Self {
            config,
            position,
            following: true,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn is_following(&self) -> bool {
        self.following
    }

    /// Ease toward `target`; holds still while following is off
    pub fn update(&mut self, target: Vec2, dt: f32) {
        if !self.following {
            return;
        }
        let goal = target + self.config.offset;
        // Frame-rate independent smoothing
        let t = 1.0 - (1.0 - self.config.smoothing).powf(dt * 60.0);
        self.position = self.position.lerp(goal, t);
    }

    /// Jump straight to `target` with no easing
    pub fn snap_to(&mut self, target: Vec2) {
        self.position = target + self.config.offset;
    }
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self::new(CameraConfig::default(), Vec2::ZERO)
    }
}

impl CameraFollow for FollowCamera {
    fn set_following(&mut self, following: bool) {
        self.following = following;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_moves_toward_target() {
        let mut camera = FollowCamera::default();
        camera.update(Vec2::new(10.0, 0.0), 1.0 / 60.0);
        let x = camera.position().x;
        assert!(x > 0.0 && x < 10.0);
    }

    #[test]
    fn test_paused_follow_holds_position() {
        let mut camera = FollowCamera::default();
        camera.set_following(false);
        camera.update(Vec2::new(10.0, 0.0), 1.0 / 60.0);
        assert_eq!(camera.position(), Vec2::ZERO);
    }

    #[test]
    fn test_snap() {
        let mut camera = FollowCamera::default();
        camera.snap_to(Vec2::new(3.0, 3.0));
        assert_eq!(camera.position(), Vec2::new(3.0, 4.0));
    }
}
