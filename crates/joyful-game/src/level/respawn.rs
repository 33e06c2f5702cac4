//! Respawn sequencing
//!
//! Death freezes the player and starts a countdown advanced by the same fixed
//! tick as the controller. When it runs out the player is put back at the
//! checkpoint with full health.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{CameraFollow, EffectKind, EffectSink, HealthPool, ScoreBoard};
use crate::error::RespawnError;
use crate::player::MotionController;

/// Level-authored respawn settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RespawnConfig {
    /// Seconds between death and respawn
    pub respawn_delay: f32,
    /// Points removed on each death
    pub points_penalty_on_death: i32,
    /// Starting checkpoint; required
    pub checkpoint: Option<Vec2>,
}

impl Default for RespawnConfig {
    fn default() -> Self {
        Self {
            respawn_delay: 1.0,
            points_penalty_on_death: 50,
            checkpoint: None,
        }
    }
}

/// Where the sequence currently is
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RespawnPhase {
    Idle,
    Waiting { remaining: f32 },
}

/// Everything a respawn touches, borrowed for the duration of one call
pub struct RespawnContext<'a> {
    pub player: &'a mut MotionController,
    pub score: &'a mut dyn ScoreBoard,
    pub health: &'a mut dyn HealthPool,
    pub camera: &'a mut dyn CameraFollow,
    pub effects: &'a mut dyn EffectSink,
}

/// Timed death/respawn state machine
#[derive(Debug, Clone)]
pub struct RespawnSequencer {
    respawn_delay: f32,
    points_penalty_on_death: i32,
    checkpoint: Vec2,
    phase: RespawnPhase,
}

impl RespawnSequencer {
    pub fn new(config: RespawnConfig) -> Result<Self, RespawnError> {
        let checkpoint = config
            .checkpoint
            .ok_or(RespawnError::MissingCollaborator("checkpoint"))?;
        if !config.respawn_delay.is_finite() || config.respawn_delay < 0.0 {
            return Err(RespawnError::InvalidDelay);
        }

        Ok(Self {
            respawn_delay: config.respawn_delay,
            points_penalty_on_death: config.points_penalty_on_death,
            checkpoint,
            phase: RespawnPhase::Idle,
        })
    }

    pub fn phase(&self) -> RespawnPhase {
        self.phase
    }

    pub fn is_respawning(&self) -> bool {
        matches!(self.phase, RespawnPhase::Waiting { .. })
    }

    pub fn checkpoint(&self) -> Vec2 {
        self.checkpoint
    }

    /// Move the respawn point (checkpoint reached)
    pub fn set_checkpoint(&mut self, position: Vec2) {
        info!(?position, "checkpoint set");
        self.checkpoint = position;
    }

    /// Kill the player and start the countdown
    pub fn trigger(&mut self, ctx: &mut RespawnContext<'_>) -> Result<(), RespawnError> {
        if self.is_respawning() {
            warn!("respawn triggered while already respawning");
            return Err(RespawnError::AlreadyRespawning);
        }

        let position = ctx.player.state().position;
        ctx.effects.spawn_effect(EffectKind::Death, position);
        ctx.player.freeze();
        ctx.camera.set_following(false);
        ctx.score.add_points(-self.points_penalty_on_death);

        info!(delay = self.respawn_delay, "player respawn");
        self.phase = RespawnPhase::Waiting {
            remaining: self.respawn_delay,
        };
        Ok(())
    }

    /// Advance the countdown, finishing the respawn when it runs out
    pub fn update(&mut self, dt: f32, ctx: &mut RespawnContext<'_>) -> RespawnPhase {
        let RespawnPhase::Waiting { remaining } = self.phase else {
            return self.phase;
        };

        let remaining = remaining - dt;
        if remaining > 0.0 {
            self.phase = RespawnPhase::Waiting { remaining };
            return self.phase;
        }

        ctx.player.teleport(self.checkpoint);
        ctx.player.clear_knockback();
        ctx.health.full_heal();
        ctx.health.set_dead(false);
        ctx.player.unfreeze();
        ctx.camera.set_following(true);
        ctx.effects.spawn_effect(EffectKind::Respawn, self.checkpoint);
        ctx.player.zero_velocity();

        info!(checkpoint = ?self.checkpoint, "player respawned");
        self.phase = RespawnPhase::Idle;
        self.phase
    }
}
