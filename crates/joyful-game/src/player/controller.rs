//! Motion controller: sensing, jump/fire gating and velocity integration

use glam::Vec2;
use joyful_core::Facing;
use joyful_physics::{BodyState, GroundQuery};
use tracing::{debug, info};

use super::{ControlInput, CurveSample, MotionState, StepOutcome, TuningParameters};
use crate::combat::{KnockbackDirection, KnockbackState, ProjectileCooldown, ProjectileSpawn};
use crate::error::ConfigError;

/// Ladder climbing divides horizontal speed by this while climbing up
const LADDER_HORIZONTAL_DAMPING: f32 = 1.5;

/// Player motion state machine, advanced once per fixed tick
#[derive(Debug, Clone)]
pub struct MotionController {
    tuning: TuningParameters,
    state: MotionState,
    knockback: KnockbackState,
    cooldown: ProjectileCooldown,
    /// Control suspended; the host must not call `step`
    frozen: bool,
    /// Whether the character should be drawn
    visible: bool,
}

impl MotionController {
    /// Create a controller at `position` after validating its tuning
    pub fn new(tuning: TuningParameters, position: Vec2) -> Result<Self, ConfigError> {
        tuning.validate()?;
        let state = MotionState::at(position, tuning.body_gravity_scale);
        Ok(Self {
            tuning,
            state,
            knockback: KnockbackState::default(),
            cooldown: ProjectileCooldown::default(),
            frozen: false,
            visible: true,
        })
    }

    /// Validated tuning in use
    pub fn tuning(&self) -> &TuningParameters {
        &self.tuning
    }

    /// Current motion state
    pub fn state(&self) -> &MotionState {
        &self.state
    }

    /// Active or finished knockback timer
    pub fn knockback(&self) -> &KnockbackState {
        &self.knockback
    }

    /// Projectile cooldown counter
    pub fn cooldown(&self) -> &ProjectileCooldown {
        &self.cooldown
    }

    /// Whether control is suspended
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Whether the character should be drawn
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Advance one tick.
    ///
    /// `dt` must be finite and positive; the rig checks this before calling.
    /// A frozen controller returns its state untouched.
    pub fn step(&mut self, dt: f32, input: &ControlInput, env: &impl GroundQuery) -> StepOutcome {
        if self.frozen {
            return StepOutcome {
                state: self.state,
                projectile: None,
            };
        }
        debug_assert!(dt.is_finite() && dt > 0.0, "invalid tick delta {dt}");

        self.sense(dt, env);
        let (jumped, projectile) = self.decide(dt, input);
        let knocked_back = self.integrate(dt, input, jumped);
        self.climb(input, knocked_back);
        self.orient();

        StepOutcome {
            state: self.state,
            projectile,
        }
    }

    fn sense(&mut self, dt: f32, env: &impl GroundQuery) {
        let sensor = self.state.position + self.tuning.ground_check_offset;
        self.state.grounded =
            env.is_grounded(sensor, self.tuning.ground_check_radius, self.tuning.ground_mask);

        self.state.falling = self.state.velocity.y <= self.tuning.high_gravity_threshold_velocity;
        if self.state.falling {
            self.state.fall_time += dt;
        } else {
            self.state.fall_time = 0.0;
        }
    }

    fn decide(&mut self, dt: f32, input: &ControlInput) -> (bool, Option<ProjectileSpawn>) {
        self.cooldown.tick(dt);

        let jumped = input.jump_held && self.state.grounded;

        let projectile = if input.fire_held && self.cooldown.try_fire(self.tuning.shot_delay) {
            let origin = self.state.position + self.tuning.fire_point_offset;
            debug!(?origin, aim = ?input.aim, "projectile fired");
            Some(ProjectileSpawn {
                origin,
                direction: input.aim,
            })
        } else {
            None
        };

        (jumped, projectile)
    }

    /// Returns true when the knockback override owned this tick
    fn integrate(&mut self, dt: f32, input: &ControlInput, jumped: bool) -> bool {
        if self.knockback.is_active() {
            self.state.velocity = self.knockback.velocity(self.tuning.knockback_magnitude);
            if self.knockback.tick(dt) {
                info!("knockback ended");
            }
            return true;
        }

        let t = &self.tuning;
        let velocity = self.state.velocity;

        let vy = if jumped {
            debug!(velocity = t.jump_velocity, "jump");
            t.jump_velocity
        } else {
            let normalized =
                (self.state.fall_time / t.seconds_to_reach_max_gravity).clamp(0.0, 1.0);
            let mut gravity = t.base_gravity * t.gravity_curve.evaluate(normalized);
            if input.jump_held && !self.state.falling {
                gravity *= t.jump_gravity_reduction;
            }
            velocity.y - gravity
        };

        let vx = if self.state.grounded {
            t.move_speed * input.horizontal
        } else if velocity.x.abs() > t.max_aerial_drift {
            lerp(velocity.x, t.max_aerial_drift.copysign(velocity.x), t.aerial_drag)
        } else {
            lerp(velocity.x, t.max_aerial_drift * input.horizontal, t.aerial_drift)
        };

        self.state.velocity = Vec2::new(vx, vy.max(t.terminal_velocity));
        false
    }

    fn climb(&mut self, input: &ControlInput, knocked_back: bool) {
        if !self.state.on_ladder {
            self.state.gravity_scale = self.tuning.body_gravity_scale;
            return;
        }

        self.state.gravity_scale = 0.0;
        if knocked_back {
            return;
        }

        let mut velocity = self.state.velocity;
        velocity.y = (self.tuning.climb_speed * input.vertical).max(self.tuning.terminal_velocity);
        if input.vertical > 0.0 {
            velocity.x /= LADDER_HORIZONTAL_DAMPING;
        }
        self.state.velocity = velocity;
    }

    fn orient(&mut self) {
        if let Some(facing) = Facing::from_velocity_x(self.state.velocity.x) {
            self.state.facing = facing;
        }
    }

    /// Start a knockback from a damage event
    pub fn apply_knockback(&mut self, direction: KnockbackDirection) {
        self.knockback.start(self.tuning.knockback_duration, direction);
        info!(?direction, duration = self.tuning.knockback_duration, "knockback started");
    }

    /// Drop any knockback in progress
    pub fn clear_knockback(&mut self) {
        self.knockback.clear();
    }

    /// Ladder trigger entered or left
    pub fn set_on_ladder(&mut self, on_ladder: bool) {
        if self.state.on_ladder != on_ladder {
            debug!(on_ladder, "ladder contact changed");
        }
        self.state.on_ladder = on_ladder;
    }

    /// Suspend control and hide the character
    pub fn freeze(&mut self) {
        self.frozen = true;
        self.visible = false;
    }

    /// Restore control and show the character
    pub fn unfreeze(&mut self) {
        self.frozen = false;
        self.visible = true;
    }

    /// Move without touching velocity
    pub fn teleport(&mut self, position: Vec2) {
        self.state.position = position;
    }

    /// Stop all motion
    pub fn zero_velocity(&mut self) {
        self.state.velocity = Vec2::ZERO;
    }

    /// Take back what the physics backend resolved after its step.
    ///
    /// Backend gravity may have pushed the body past terminal velocity, so the
    /// floor is applied again here.
    pub fn sync_body(&mut self, body: &BodyState) {
        self.state.sync_from_body(body);
        self.state.velocity.y = self.state.velocity.y.max(self.tuning.terminal_velocity);
    }
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t.clamp(0.0, 1.0)
}
