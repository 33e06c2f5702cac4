//! Ground sensing

use glam::Vec2;

/// Capability to test for a supporting surface under a point.
///
/// Any backend that can overlap a circle against a ground layer qualifies.
pub trait GroundQuery {
    fn is_grounded(&self, position: Vec2, radius: f32, ground_mask: u32) -> bool;
}

impl<T: GroundQuery + ?Sized> GroundQuery for &T {
    fn is_grounded(&self, position: Vec2, radius: f32, ground_mask: u32) -> bool {
        (**self).is_grounded(position, radius, ground_mask)
    }
}

/// Infinite horizontal floor at a fixed height, on every layer in `layers`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatGround {
    /// Height of the floor surface
    pub height: f32,
    /// Layers the floor belongs to
    pub layers: u32,
}

impl FlatGround {
    pub fn new(height: f32, layers: u32) -> Self {
        Self { height, layers }
    }
}

impl GroundQuery for FlatGround {
    fn is_grounded(&self, position: Vec2, radius: f32, ground_mask: u32) -> bool {
        self.layers & ground_mask != 0 && position.y - radius <= self.height
    }
}

/// Test double that always reports the same answer
impl GroundQuery for bool {
    fn is_grounded(&self, _position: Vec2, _radius: f32, _ground_mask: u32) -> bool {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GROUND_LAYER, PLAYER_LAYER};

    #[test]
    fn test_flat_ground_contact() {
        let floor = FlatGround::new(0.0, GROUND_LAYER);
        assert!(floor.is_grounded(Vec2::new(3.0, 0.05), 0.1, GROUND_LAYER));
        assert!(!floor.is_grounded(Vec2::new(3.0, 0.5), 0.1, GROUND_LAYER));
        assert!(!floor.is_grounded(Vec2::new(3.0, 0.05), 0.1, PLAYER_LAYER));
    }

    #[test]
    fn test_constant_query() {
        assert!(true.is_grounded(Vec2::ZERO, 1.0, 0));
        assert!(!false.is_grounded(Vec2::ZERO, 1.0, GROUND_LAYER));
    }
}
