//! Core types used throughout Joyful

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for spawned entities (projectiles, effects, players)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    /// Create a new random entity ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

/// Which way a character sprite is facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Horizontal sprite scale for this facing (+1 right, -1 left)
    pub fn scale_x(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    /// Facing implied by a horizontal velocity, or `None` when it is exactly zero
    pub fn from_velocity_x(vx: f32) -> Option<Self> {
        if vx > 0.0 {
            Some(Facing::Right)
        } else if vx < 0.0 {
            Some(Facing::Left)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_ids_are_unique() {
        assert_ne!(EntityId::new(), EntityId::new());
    }

    #[test]
    fn test_facing_from_velocity() {
        assert_eq!(Facing::from_velocity_x(0.5), Some(Facing::Right));
        assert_eq!(Facing::from_velocity_x(-0.5), Some(Facing::Left));
        assert_eq!(Facing::from_velocity_x(0.0), None);
        assert_eq!(Facing::Left.scale_x(), -1.0);
    }
}
