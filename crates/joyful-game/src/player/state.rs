//! Per-character motion state and per-tick input

use glam::Vec2;
use joyful_core::Facing;
use joyful_physics::BodyState;
use serde::{Deserialize, Serialize};

use crate::combat::ProjectileSpawn;

/// Motion state owned by a [`MotionController`](super::MotionController)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionState {
    pub position: Vec2,
    pub velocity: Vec2,
    pub facing: Facing,
    pub grounded: bool,
    pub falling: bool,
    /// Seconds spent falling; zero whenever `falling` is false
    pub fall_time: f32,
    pub on_ladder: bool,
    /// Effective body gravity scale (zero while on a ladder)
    pub gravity_scale: f32,
}

impl MotionState {
    pub fn at(position: Vec2, gravity_scale: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            facing: Facing::Right,
            grounded: false,
            falling: false,
            fall_time: 0.0,
            on_ladder: false,
            gravity_scale,
        }
    }

    /// Body slice handed to a physics backend
    pub fn body(&self) -> BodyState {
        BodyState {
            position: self.position,
            velocity: self.velocity,
            gravity_scale: self.gravity_scale,
        }
    }

    /// Take back the position and velocity a backend resolved
    pub fn sync_from_body(&mut self, body: &BodyState) {
        self.position = body.position;
        self.velocity = body.velocity;
    }

    /// Parameters an external animator consumes
    pub fn animation_params(&self) -> AnimationParams {
        AnimationParams {
            grounded: self.grounded,
            speed_x: self.velocity.x.abs(),
            velocity_y: self.velocity.y,
            sprite_scale_x: self.facing.scale_x(),
        }
    }
}

impl Default for MotionState {
    fn default() -> Self {
        Self::at(Vec2::ZERO, 1.0)
    }
}

/// Animator inputs derived from motion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationParams {
    pub grounded: bool,
    pub speed_x: f32,
    pub velocity_y: f32,
    /// Horizontal sprite flip for the current facing
    pub sprite_scale_x: f32,
}

/// Control input sampled for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlInput {
    /// Horizontal stick in [-1, 1]
    pub horizontal: f32,
    /// Vertical stick in [-1, 1]
    pub vertical: f32,
    pub jump_held: bool,
    pub fire_held: bool,
    /// Vector from the character toward the aim point
    pub aim: Vec2,
}

impl ControlInput {
    /// Clamp axes into [-1, 1] and replace non-finite values with zero
    pub fn sanitized(self) -> Self {
        fn axis(v: f32) -> f32 {
            if v.is_finite() {
                v.clamp(-1.0, 1.0)
            } else {
                0.0
            }
        }
        Self {
            horizontal: axis(self.horizontal),
            vertical: axis(self.vertical),
            aim: if self.aim.is_finite() { self.aim } else { Vec2::ZERO },
            ..self
        }
    }

    /// Aim vector from a world-space pointer position
    pub fn aim_at(mut self, from: Vec2, pointer_world: Vec2) -> Self {
        self.aim = pointer_world - from;
        self
    }
}

/// Result of one controller tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub state: MotionState,
    /// At most one projectile request per tick
    pub projectile: Option<ProjectileSpawn>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_clamps_axes() {
        let input = ControlInput {
            horizontal: 3.0,
            vertical: f32::NAN,
            aim: Vec2::new(f32::INFINITY, 0.0),
            ..Default::default()
        }
        .sanitized();
        assert_eq!(input.horizontal, 1.0);
        assert_eq!(input.vertical, 0.0);
        assert_eq!(input.aim, Vec2::ZERO);
    }

    #[test]
    fn test_animation_params() {
        let mut state = MotionState::default();
        state.velocity = Vec2::new(-2.0, 1.5);
        state.grounded = true;
        state.facing = Facing::Left;
        let params = state.animation_params();
        assert_eq!(params.sprite_scale_x, -1.0);
        assert_eq!(params.speed_x, 2.0);
        assert_eq!(params.velocity_y, 1.5);
        assert!(params.grounded);
    }

    #[test]
    fn test_aim_at_pointer() {
        let input = ControlInput::default().aim_at(Vec2::new(1.0, 1.0), Vec2::new(4.0, 5.0));
        assert_eq!(input.aim, Vec2::new(3.0, 4.0));
    }
}
