//! Interfaces the respawn sequence drives, with simple in-memory implementations

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub trait ScoreBoard {
    fn add_points(&mut self, delta: i32);
}

pub trait HealthPool {
    fn full_heal(&mut self);
    fn is_dead(&self) -> bool;
    fn set_dead(&mut self, dead: bool);
}

pub trait CameraFollow {
    fn set_following(&mut self, following: bool);
}

/// One-shot visual effects the level asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    Death,
    Respawn,
}

pub trait EffectSink {
    fn spawn_effect(&mut self, kind: EffectKind, position: Vec2);
}

/// Running score total
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub points: i64,
}

impl ScoreBoard for Score {
    fn add_points(&mut self, delta: i32) {
        self.points += delta as i64;
    }
}

/// Player hit points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
    pub max: i32,
    pub dead: bool,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self {
            current: max,
            max,
            dead: false,
        }
    }

    /// Apply damage. Returns true if this hit killed.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if self.dead {
            return false;
        }
        self.current = (self.current - amount.max(0)).max(0);
        if self.current == 0 {
            self.dead = true;
            return true;
        }
        false
    }
}

impl HealthPool for Health {
    fn full_heal(&mut self) {
        self.current = self.max;
    }

    fn is_dead(&self) -> bool {
        self.dead
    }

    fn set_dead(&mut self, dead: bool) {
        self.dead = dead;
    }
}

/// Effect sink that records requests in order
#[derive(Debug, Clone, Default)]
pub struct EffectLog {
    pub spawned: Vec<(EffectKind, Vec2)>,
}

impl EffectSink for EffectLog {
    fn spawn_effect(&mut self, kind: EffectKind, position: Vec2) {
        self.spawned.push((kind, position));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_death_and_heal() {
        let mut health = Health::new(3);
        assert!(!health.take_damage(2));
        assert!(health.take_damage(5));
        assert_eq!(health.current, 0);
        assert!(health.is_dead());
        assert!(!health.take_damage(1));

        health.full_heal();
        health.set_dead(false);
        assert_eq!(health.current, 3);
        assert!(!health.is_dead());
    }

    #[test]
    fn test_score_accepts_penalties() {
        let mut score = Score::default();
        score.add_points(10);
        score.add_points(-25);
        assert_eq!(score.points, -15);
    }
}
