//! Body adapters that mirror controller-owned motion into a physics backend

use glam::Vec2;
use rapier2d::prelude::*;
use tracing::debug;

use crate::{FlatGround, GroundQuery, PhysicsWorld, GROUND_LAYER, PLAYER_LAYER};

/// The slice of motion state a backend body needs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Multiplier on the backend's own gravity
    pub gravity_scale: f32,
}

impl Default for BodyState {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            gravity_scale: 1.0,
        }
    }
}

/// A backend holding exactly one character body.
///
/// The controller writes its state in, the backend advances, and the resolved
/// position and velocity are read back before the next tick.
pub trait BodyBackend: GroundQuery {
    fn write_body(&mut self, body: &BodyState);
    fn read_body(&self) -> BodyState;
    fn step(&mut self, dt: f32);
}

/// Character capsule living inside a rapier2d world
pub struct RapierCharacter {
    /// The world the capsule lives in, with its level geometry
    pub world: PhysicsWorld,
    body: RigidBodyHandle,
    /// Capsule height (default: 1.0)
    pub height: f32,
    /// Capsule radius (default: 0.3)
    pub radius: f32,
}

impl RapierCharacter {
    /// Spawn a capsule with its origin at `position`
    pub fn spawn(world: PhysicsWorld, position: Vec2, gravity_scale: f32) -> Self {
        Self::spawn_with_size(world, position, gravity_scale, 1.0, 0.3)
    }

    pub fn spawn_with_size(
        mut world: PhysicsWorld,
        position: Vec2,
        gravity_scale: f32,
        height: f32,
        radius: f32,
    ) -> Self {
        let rigid_body = RigidBodyBuilder::dynamic()
            .translation(vector![position.x, position.y])
            .gravity_scale(gravity_scale)
            .lock_rotations()
            .build();

        let half_height = (height - 2.0 * radius) / 2.0;
        let collider = ColliderBuilder::capsule_y(half_height.max(0.01), radius)
            .friction(0.0) // Smooth sliding against walls
            .restitution(0.0)
            .collision_groups(InteractionGroups::new(
                Group::from_bits_truncate(PLAYER_LAYER),
                Group::from_bits_truncate(GROUND_LAYER),
            ))
            .build();

        let (body, _) = world.add_dynamic_body(rigid_body, collider);
        debug!(?position, height, radius, "character body spawned");

        Self {
            world,
            body,
            height,
            radius,
        }
    }
}

impl GroundQuery for RapierCharacter {
    fn is_grounded(&self, position: Vec2, radius: f32, ground_mask: u32) -> bool {
        self.world
            .overlap_circle(position, radius, ground_mask, Some(self.body))
            .is_some()
    }
}

impl BodyBackend for RapierCharacter {
    fn write_body(&mut self, state: &BodyState) {
        if let Some(rb) = self.world.get_rigid_body_mut(self.body) {
            rb.set_translation(vector![state.position.x, state.position.y], true);
            rb.set_linvel(vector![state.velocity.x, state.velocity.y], true);
            rb.set_gravity_scale(state.gravity_scale, true);
        }
    }

    fn read_body(&self) -> BodyState {
        let Some(rb) = self.world.get_rigid_body(self.body) else {
            return BodyState::default();
        };
        let translation = rb.translation();
        let linvel = rb.linvel();
        BodyState {
            position: Vec2::new(translation.x, translation.y),
            velocity: Vec2::new(linvel.x, linvel.y),
            gravity_scale: rb.gravity_scale(),
        }
    }

    fn step(&mut self, dt: f32) {
        self.world.step(dt);
    }
}

/// Collision-free body over a flat floor, for headless runs and tests
#[derive(Debug, Clone)]
pub struct KinematicBody {
    pub state: BodyState,
    pub floor: FlatGround,
    /// Backend gravity, scaled by the body's gravity scale
    pub gravity: Vec2,
    /// Distance from the body origin down to its feet
    pub feet_offset: f32,
}

impl KinematicBody {
    pub fn new(position: Vec2, floor: FlatGround) -> Self {
        Self {
            state: BodyState {
                position,
                ..Default::default()
            },
            floor,
            gravity: Vec2::ZERO,
            feet_offset: 0.5,
        }
    }

    pub fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }
}

impl GroundQuery for KinematicBody {
    fn is_grounded(&self, position: Vec2, radius: f32, ground_mask: u32) -> bool {
        self.floor.is_grounded(position, radius, ground_mask)
    }
}

impl BodyBackend for KinematicBody {
    fn write_body(&mut self, body: &BodyState) {
        self.state = *body;
    }

    fn read_body(&self) -> BodyState {
        self.state
    }

    fn step(&mut self, dt: f32) {
        let state = &mut self.state;
        state.velocity += self.gravity * state.gravity_scale * dt;
        state.position += state.velocity * dt;

        // Resolve penetration into the floor
        let rest_height = self.floor.height + self.feet_offset;
        if state.position.y < rest_height {
            state.position.y = rest_height;
            state.velocity.y = state.velocity.y.max(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinematic_body_lands_on_floor() {
        let mut body = KinematicBody::new(Vec2::new(0.0, 1.0), FlatGround::new(0.0, GROUND_LAYER));
        body.write_body(&BodyState {
            position: Vec2::new(0.0, 1.0),
            velocity: Vec2::new(1.0, -10.0),
            gravity_scale: 1.0,
        });
        body.step(0.5);

        let state = body.read_body();
        assert_eq!(state.position.y, 0.5);
        assert_eq!(state.velocity.y, 0.0);
        assert!((state.position.x - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_kinematic_gravity_honours_scale() {
        let mut body = KinematicBody::new(Vec2::new(0.0, 10.0), FlatGround::new(0.0, GROUND_LAYER))
            .with_gravity(Vec2::new(0.0, -10.0));
        body.state.gravity_scale = 0.0;
        body.step(0.1);
        assert_eq!(body.read_body().velocity.y, 0.0);

        body.state.gravity_scale = 1.0;
        body.step(0.1);
        assert!((body.read_body().velocity.y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_rapier_character_round_trips_state() {
        let mut character = RapierCharacter::spawn(PhysicsWorld::new(), Vec2::new(0.0, 5.0), 1.0);
        let written = BodyState {
            position: Vec2::new(1.0, 4.0),
            velocity: Vec2::new(2.0, 0.0),
            gravity_scale: 0.0,
        };
        character.write_body(&written);
        assert_eq!(character.read_body(), written);
    }

    #[test]
    fn test_rapier_character_does_not_sense_itself() {
        let mut world = PhysicsWorld::new();
        world.create_ground(0.0);
        let character = RapierCharacter::spawn(world, Vec2::new(0.0, 5.0), 1.0);

        // Sensor sits inside the capsule but only the ground layer counts
        assert!(!character.is_grounded(Vec2::new(0.0, 5.0), 0.1, GROUND_LAYER));
        assert!(character.is_grounded(Vec2::new(0.0, 0.05), 0.1, GROUND_LAYER));
    }
}
