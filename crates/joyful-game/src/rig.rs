//! Player rig: glue between the controller, a physics backend and the
//! projectile owner, run once per fixed tick by the host loop

use joyful_physics::BodyBackend;
use tracing::warn;

use crate::combat::{ProjectileCharge, ProjectileHandle, ProjectileSpawner};
use crate::error::TickError;
use crate::player::{ControlInput, MotionController, MotionState};

/// What happened during one rig tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub state: MotionState,
    pub projectile: Option<ProjectileHandle>,
    /// True when control was suspended and the controller did not run
    pub frozen: bool,
}

/// A player controller paired with its projectile supply
pub struct PlayerRig {
    pub controller: MotionController,
    /// Projectiles left to throw
    pub charge: ProjectileCharge,
}

impl PlayerRig {
    /// Pair a controller with a starting charge
    pub fn new(controller: MotionController, charge: ProjectileCharge) -> Self {
        Self { controller, charge }
    }

    /// Run the controller, then let the backend resolve the body
    pub fn tick<B, S>(
        &mut self,
        dt: f32,
        input: &ControlInput,
        backend: &mut B,
        spawner: &mut S,
    ) -> Result<TickReport, TickError>
    where
        B: BodyBackend,
        S: ProjectileSpawner + ?Sized,
    {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(TickError::InvalidDelta(dt));
        }

        if self.controller.is_frozen() {
            backend.step(dt);
            self.controller.sync_body(&backend.read_body());
            return Ok(TickReport {
                state: *self.controller.state(),
                projectile: None,
                frozen: true,
            });
        }

        let input = input.sanitized();
        let outcome = self.controller.step(dt, &input, &*backend);

        let projectile = match outcome.projectile {
            Some(spawn) if self.charge.consume() => {
                Some(spawner.spawn_projectile(spawn.origin, spawn.direction))
            }
            Some(_) => {
                warn!("projectile charge empty, shot dropped");
                None
            }
            None => None,
        };

        backend.write_body(&outcome.state.body());
        backend.step(dt);
        self.controller.sync_body(&backend.read_body());

        Ok(TickReport {
            state: *self.controller.state(),
            projectile,
            frozen: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::ProjectileLog;
    use crate::player::TuningParameters;
    use glam::Vec2;
    use joyful_physics::{FlatGround, KinematicBody, GROUND_LAYER};

    fn rig(charge: u32) -> (PlayerRig, KinematicBody) {
        let start = Vec2::new(0.0, 0.5);
        let controller = MotionController::new(TuningParameters::default(), start).unwrap();
        let body = KinematicBody::new(start, FlatGround::new(0.0, GROUND_LAYER));
        (PlayerRig::new(controller, ProjectileCharge::new(charge)), body)
    }

    #[test]
    fn test_rejects_bad_delta() {
        let (mut rig, mut body) = rig(0);
        let mut log = ProjectileLog::default();
        let input = ControlInput::default();
        assert_eq!(
            rig.tick(0.0, &input, &mut body, &mut log),
            Err(TickError::InvalidDelta(0.0))
        );
        assert!(rig.tick(f32::NAN, &input, &mut body, &mut log).is_err());
    }

    #[test]
    fn test_run_moves_body() {
        let (mut rig, mut body) = rig(0);
        let mut log = ProjectileLog::default();
        let input = ControlInput {
            horizontal: 1.0,
            ..Default::default()
        };

        for _ in 0..10 {
            rig.tick(0.1, &input, &mut body, &mut log).unwrap();
        }
        let state = rig.controller.state();
        assert!((state.position.x - 5.0).abs() < 1e-4);
        assert!(state.grounded);
        assert_eq!(state.position.y, 0.5);
    }

    #[test]
    fn test_jump_leaves_ground() {
        let (mut rig, mut body) = rig(0);
        let mut log = ProjectileLog::default();
        let jump = ControlInput {
            jump_held: true,
            ..Default::default()
        };

        let report = rig.tick(1.0 / 60.0, &jump, &mut body, &mut log).unwrap();
        assert_eq!(report.state.velocity.y, 10.0);
        assert!(report.state.position.y > 0.5);
    }

    #[test]
    fn test_spawns_use_charge() {
        let (mut rig, mut body) = rig(1);
        let mut log = ProjectileLog::default();
        let fire = ControlInput {
            fire_held: true,
            aim: Vec2::X,
            ..Default::default()
        };

        let first = rig.tick(0.1, &fire, &mut body, &mut log).unwrap();
        assert!(first.projectile.is_some());
        assert_eq!(rig.charge.count, 0);

        for _ in 0..10 {
            let report = rig.tick(0.1, &fire, &mut body, &mut log).unwrap();
            assert!(report.projectile.is_none());
        }
        assert_eq!(log.spawned.len(), 1);
    }

    #[test]
    fn test_rapier_fall_respects_terminal_velocity() {
        use joyful_physics::{PhysicsWorld, RapierCharacter};

        let start = Vec2::new(0.0, 50.0);
        let tuning = TuningParameters {
            terminal_velocity: -5.0,
            ..Default::default()
        };
        let controller = MotionController::new(tuning, start).unwrap();
        let mut rig = PlayerRig::new(controller, ProjectileCharge::new(0));
        let mut backend = RapierCharacter::spawn(PhysicsWorld::new(), start, 1.0);
        let mut log = ProjectileLog::default();

        let mut slowest = 0.0f32;
        for tick in 0..120 {
            let report = rig
                .tick(1.0 / 60.0, &ControlInput::default(), &mut backend, &mut log)
                .unwrap();
            let vy = rig.controller.state().velocity.y;
            assert!(report.state.velocity.y >= -5.0, "tick {tick}: {}", report.state.velocity.y);
            assert!(vy >= -5.0, "tick {tick}: {vy}");
            slowest = slowest.min(vy);
        }
        assert_eq!(slowest, -5.0);
    }

    #[test]
    fn test_frozen_rig_skips_controller() {
        let (mut rig, mut body) = rig(5);
        let mut log = ProjectileLog::default();
        rig.controller.freeze();

        let fire = ControlInput {
            fire_held: true,
            horizontal: 1.0,
            ..Default::default()
        };
        let report = rig.tick(0.1, &fire, &mut body, &mut log).unwrap();
        assert!(report.frozen);
        assert!(report.projectile.is_none());
        assert_eq!(report.state.position.x, 0.0);
        assert!(log.spawned.is_empty());
    }
}
