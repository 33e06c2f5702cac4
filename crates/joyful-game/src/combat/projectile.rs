//! Projectile cooldown, spawn requests and the shared charge counter

use glam::Vec2;
use joyful_core::EntityId;
use serde::{Deserialize, Serialize};

/// Countdown gating repeat fire
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectileCooldown {
    /// Seconds until the next shot is allowed; never negative
    pub counter: f32,
}

impl ProjectileCooldown {
    pub fn tick(&mut self, delta: f32) {
        self.counter = (self.counter - delta).max(0.0);
    }

    pub fn is_ready(&self) -> bool {
        self.counter <= 0.0
    }

    /// Consume the cooldown if ready, restarting it at `delay`
    pub fn try_fire(&mut self, delay: f32) -> bool {
        if !self.is_ready() {
            return false;
        }
        self.counter = delay;
        true
    }
}

/// Request for the projectile owner to spawn one projectile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileSpawn {
    pub origin: Vec2,
    /// Aim vector; the projectile's initial velocity
    pub direction: Vec2,
}

/// Handle to a spawned projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProjectileHandle(pub EntityId);

impl ProjectileHandle {
    pub fn new() -> Self {
        Self(EntityId::new())
    }
}

impl Default for ProjectileHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Owner of projectile entities
pub trait ProjectileSpawner {
    fn spawn_projectile(&mut self, origin: Vec2, direction: Vec2) -> ProjectileHandle;
}

/// Projectiles available to throw, owned outside the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectileCharge {
    pub count: u32,
}

impl ProjectileCharge {
    pub fn new(count: u32) -> Self {
        Self { count }
    }

    /// Use one charge. Returns false when empty.
    pub fn consume(&mut self) -> bool {
        if self.count == 0 {
            return false;
        }
        self.count -= 1;
        true
    }

    pub fn refill(&mut self, amount: u32) {
        self.count = self.count.saturating_add(amount);
    }
}

/// In-memory spawner that records every projectile it was asked for
#[derive(Debug, Clone, Default)]
pub struct ProjectileLog {
    pub spawned: Vec<(ProjectileHandle, ProjectileSpawn)>,
}

impl ProjectileSpawner for ProjectileLog {
    fn spawn_projectile(&mut self, origin: Vec2, direction: Vec2) -> ProjectileHandle {
        let handle = ProjectileHandle::new();
        self.spawned.push((handle, ProjectileSpawn { origin, direction }));
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooldown_gates_fire() {
        let mut cooldown = ProjectileCooldown::default();
        assert!(cooldown.try_fire(0.5));
        assert!(!cooldown.try_fire(0.5));

        cooldown.tick(0.3);
        assert!(!cooldown.is_ready());
        cooldown.tick(0.3);
        assert_eq!(cooldown.counter, 0.0);
        assert!(cooldown.try_fire(0.5));
    }

    #[test]
    fn test_charge_consumption() {
        let mut charge = ProjectileCharge::new(1);
        assert!(charge.consume());
        assert!(!charge.consume());
        charge.refill(2);
        assert_eq!(charge.count, 2);
    }

    #[test]
    fn test_log_spawner_records() {
        let mut log = ProjectileLog::default();
        log.spawn_projectile(Vec2::ZERO, Vec2::X);
        assert_eq!(log.spawned.len(), 1);
        assert_eq!(log.spawned[0].1.direction, Vec2::X);
    }
}
