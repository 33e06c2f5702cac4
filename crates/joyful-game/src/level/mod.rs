//! Level module
//!
//! Death and respawn sequencing plus the collaborators it drives.

mod collaborators;
mod respawn;

pub use collaborators::{
    CameraFollow, EffectKind, EffectLog, EffectSink, Health, HealthPool, Score, ScoreBoard,
};
pub use respawn::{RespawnConfig, RespawnContext, RespawnPhase, RespawnSequencer};
