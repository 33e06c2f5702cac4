//! Joyful Physics - 2D physics backends using rapier2d
//!
//! Provides the ground sensor capability, a rapier2d world with layered
//! colliders, and body adapters that mirror controller state into a backend.

mod body;
mod ground;

pub use body::{BodyBackend, BodyState, KinematicBody, RapierCharacter};
pub use ground::{FlatGround, GroundQuery};

use glam::Vec2;
use nalgebra::Unit;
use rapier2d::prelude::*;

/// Collision layer bits for level geometry the player can stand on
pub const GROUND_LAYER: u32 = 1 << 0;
/// Collision layer bits for player bodies
pub const PLAYER_LAYER: u32 = 1 << 1;

/// Physics world configuration
#[derive(Debug, Clone)]
pub struct PhysicsConfig {
    /// Gravity vector applied to bodies, scaled per body (default: -9.81 on Y)
    pub gravity: Vec2,
    /// Physics timestep (default: 1/60)
    pub timestep: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, -9.81),
            timestep: 1.0 / 60.0,
        }
    }
}

/// The main physics world containing all simulation state
pub struct PhysicsWorld {
    /// Configuration
    pub config: PhysicsConfig,

    /// Rigid body storage
    pub rigid_body_set: RigidBodySet,
    /// Collider storage
    pub collider_set: ColliderSet,
    /// Impulse joint storage
    pub impulse_joint_set: ImpulseJointSet,
    /// Multi-body joint storage
    pub multibody_joint_set: MultibodyJointSet,

    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    ccd_solver: CCDSolver,
    /// Query pipeline for overlap tests
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    /// Create a new physics world with default configuration
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create a new physics world with custom configuration
    pub fn with_config(config: PhysicsConfig) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = config.timestep;

        Self {
            config,
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Step the physics simulation by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        let gravity = vector![self.config.gravity.x, self.config.gravity.y];

        self.physics_pipeline.step(
            &gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );

        self.refresh_queries();
    }

    /// Rebuild the query acceleration structure after colliders move or are added
    pub fn refresh_queries(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Add a static collider and make it visible to queries immediately
    pub fn add_static_collider(&mut self, collider: Collider) -> ColliderHandle {
        let handle = self.collider_set.insert(collider);
        self.refresh_queries();
        handle
    }

    /// Add a dynamic rigid body with a collider
    pub fn add_dynamic_body(
        &mut self,
        rigid_body: RigidBody,
        collider: Collider,
    ) -> (RigidBodyHandle, ColliderHandle) {
        let rb_handle = self.rigid_body_set.insert(rigid_body);
        let col_handle =
            self.collider_set
                .insert_with_parent(collider, rb_handle, &mut self.rigid_body_set);
        self.refresh_queries();
        (rb_handle, col_handle)
    }

    /// Get a rigid body by handle
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Get a mutable rigid body by handle
    pub fn get_rigid_body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(handle)
    }

    /// Get a collider by handle
    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// Test a circle against colliders whose layers intersect `mask`,
    /// optionally ignoring one body (the sensing character itself)
    pub fn overlap_circle(
        &self,
        center: Vec2,
        radius: f32,
        mask: u32,
        exclude: Option<RigidBodyHandle>,
    ) -> Option<ColliderHandle> {
        let shape = Ball::new(radius);
        let shape_pos = Isometry::translation(center.x, center.y);

        let mut filter = QueryFilter::default()
            .groups(InteractionGroups::new(Group::ALL, Group::from_bits_truncate(mask)));
        if let Some(body) = exclude {
            filter = filter.exclude_rigid_body(body);
        }

        self.query_pipeline.intersection_with_shape(
            &self.rigid_body_set,
            &self.collider_set,
            &shape_pos,
            &shape,
            filter,
        )
    }

    /// Create an infinite ground half-plane at height `y`
    pub fn create_ground(&mut self, y: f32) -> ColliderHandle {
        let normal = Unit::new_normalize(vector![0.0, 1.0]);
        let ground = ColliderBuilder::halfspace(normal)
            .translation(vector![0.0, y])
            .friction(0.7)
            .restitution(0.0)
            .collision_groups(ground_groups())
            .build();
        self.add_static_collider(ground)
    }

    /// Create a static platform box on the ground layer
    pub fn create_platform(&mut self, half_extents: Vec2, position: Vec2) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y)
            .translation(vector![position.x, position.y])
            .friction(0.7)
            .collision_groups(ground_groups())
            .build();
        self.add_static_collider(collider)
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl GroundQuery for PhysicsWorld {
    fn is_grounded(&self, position: Vec2, radius: f32, ground_mask: u32) -> bool {
        self.overlap_circle(position, radius, ground_mask, None).is_some()
    }
}

fn ground_groups() -> InteractionGroups {
    InteractionGroups::new(Group::from_bits_truncate(GROUND_LAYER), Group::ALL)
}
