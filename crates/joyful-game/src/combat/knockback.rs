//! Timed knockback override

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Side the hit came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum KnockbackDirection {
    #[default]
    FromLeft,
    FromRight,
}

impl KnockbackDirection {
    /// Direction for a hit dealt by something at `source_x` to a target at `target_x`
    pub fn from_positions(source_x: f32, target_x: f32) -> Self {
        if source_x > target_x {
            KnockbackDirection::FromRight
        } else {
            KnockbackDirection::FromLeft
        }
    }

    /// Horizontal push sign: hits from the right push left
    pub fn push_sign(self) -> f32 {
        match self {
            KnockbackDirection::FromRight => -1.0,
            KnockbackDirection::FromLeft => 1.0,
        }
    }
}

/// Remaining knockback time and the side it came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KnockbackState {
    /// Seconds left; never negative
    pub remaining: f32,
    pub direction: KnockbackDirection,
}

impl KnockbackState {
    /// Start (or restart) a knockback
    pub fn start(&mut self, duration: f32, direction: KnockbackDirection) {
        self.remaining = duration.max(0.0);
        self.direction = direction;
    }

    pub fn clear(&mut self) {
        self.remaining = 0.0;
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    /// Forced velocity for a push of the given magnitude
    pub fn velocity(&self, magnitude: f32) -> Vec2 {
        Vec2::new(self.direction.push_sign() * magnitude, magnitude)
    }

    /// Count down by `delta`. Returns true when this call ended the knockback.
    pub fn tick(&mut self, delta: f32) -> bool {
        if !self.is_active() {
            return false;
        }
        self.remaining = (self.remaining - delta).max(0.0);
        self.remaining == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_direction() {
        let mut kb = KnockbackState::default();
        kb.start(0.2, KnockbackDirection::FromRight);
        assert_eq!(kb.velocity(5.0), Vec2::new(-5.0, 5.0));

        kb.start(0.2, KnockbackDirection::FromLeft);
        assert_eq!(kb.velocity(5.0), Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_tick_clamps_at_zero() {
        let mut kb = KnockbackState::default();
        kb.start(0.15, KnockbackDirection::FromLeft);

        assert!(!kb.tick(0.1));
        assert!((kb.remaining - 0.05).abs() < 1e-6);
        assert!(kb.tick(0.1));
        assert_eq!(kb.remaining, 0.0);
        assert!(!kb.tick(0.1));
        assert_eq!(kb.remaining, 0.0);
    }

    #[test]
    fn test_direction_from_positions() {
        assert_eq!(
            KnockbackDirection::from_positions(3.0, 1.0),
            KnockbackDirection::FromRight
        );
        assert_eq!(
            KnockbackDirection::from_positions(-3.0, 1.0),
            KnockbackDirection::FromLeft
        );
    }
}
