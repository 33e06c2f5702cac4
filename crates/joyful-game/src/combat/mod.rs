//! Combat module
//!
//! Knockback overrides and projectile fire gating.

pub mod knockback;
pub mod projectile;

pub use knockback::{KnockbackDirection, KnockbackState};
pub use projectile::{
    ProjectileCharge, ProjectileCooldown, ProjectileHandle, ProjectileLog, ProjectileSpawn,
    ProjectileSpawner,
};
