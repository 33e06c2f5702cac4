//! Joyful Game - Player motion and level flow
//!
//! Provides the platformer motion controller, knockback and projectile
//! gating, the follow camera, and the respawn sequencer.

pub mod camera;
pub mod combat;
pub mod error;
pub mod level;
pub mod player;
pub mod rig;

pub use camera::{CameraConfig, FollowCamera};
pub use combat::{
    KnockbackDirection, KnockbackState, ProjectileCharge, ProjectileCooldown, ProjectileHandle,
    ProjectileLog, ProjectileSpawn, ProjectileSpawner,
};
pub use error::{ConfigError, RespawnError, TickError};
pub use level::{
    CameraFollow, EffectKind, EffectLog, EffectSink, Health, HealthPool, RespawnConfig,
    RespawnContext, RespawnPhase, RespawnSequencer, Score, ScoreBoard,
};
pub use player::{
    AnimationParams, ControlInput, CurveKey, CurveSample, GravityCurve, MotionController,
    MotionState, StepOutcome, TuningParameters,
};
pub use rig::{PlayerRig, TickReport};
