//! Joyful - headless platformer session
//!
//! Drives the player controller against a rapier2d level with a scripted
//! input track, including a knockback hit and a fall into a pit that
//! exercises the respawn sequence.

mod settings;

use anyhow::{Context, Result};
use glam::Vec2;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use joyful_core::GameTime;
use joyful_game::{
    ControlInput, EffectLog, FollowCamera, Health, KnockbackDirection, MotionController,
    PlayerRig, ProjectileCharge, ProjectileLog, RespawnContext, RespawnError, RespawnSequencer,
    Score, TuningParameters,
};
use joyful_physics::{PhysicsConfig, PhysicsWorld, RapierCharacter};

use settings::DemoSettings;

/// Tick at which an enemy to the player's right lands a hit
const HIT_TICK: u64 = 150;

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    info!("Starting Joyful session...");

    let mut settings = DemoSettings::load();
    if let Some(path) = std::env::args().nth(1) {
        settings.tuning_path = Some(path.into());
    }

    let tuning = match &settings.tuning_path {
        Some(path) => TuningParameters::load(path)
            .with_context(|| format!("Failed to load tuning from {:?}", path))?,
        None => {
            info!("No tuning file given, using defaults");
            TuningParameters::default()
        }
    };

    let mut respawn =
        RespawnSequencer::new(settings.respawn.clone()).context("Invalid respawn settings")?;
    let spawn_point = respawn.checkpoint();

    let mut world = PhysicsWorld::with_config(PhysicsConfig {
        timestep: settings.time.fixed_timestep,
        ..Default::default()
    });
    // Runway ending in a pit at x = 24
    world.create_platform(Vec2::new(12.0, 0.5), Vec2::new(12.0, -0.5));
    let mut backend = RapierCharacter::spawn(world, spawn_point, tuning.body_gravity_scale);

    let controller =
        MotionController::new(tuning, spawn_point).context("Failed to build player controller")?;
    let mut rig = PlayerRig::new(controller, ProjectileCharge::new(settings.projectile_charge));

    let mut score = Score { points: 100 };
    let mut health = Health::new(3);
    let mut camera = FollowCamera::new(settings.camera.clone(), spawn_point);
    let mut effects = EffectLog::default();
    let mut projectiles = ProjectileLog::default();

    let mut time = GameTime::new(settings.time.clone());
    let dt = time.fixed_delta();
    let mut tick: u64 = 0;

    for _ in 0..settings.frames {
        time.update(settings.frame_delta);

        for _ in 0..time.fixed_steps() {
            let position = rig.controller.state().position;
            let input = scripted_input(tick, position);
            let report = rig.tick(dt, &input, &mut backend, &mut projectiles)?;

            if tick == HIT_TICK {
                let enemy_x = report.state.position.x + 1.0;
                rig.controller.apply_knockback(KnockbackDirection::from_positions(
                    enemy_x,
                    report.state.position.x,
                ));
            }

            let fell = !respawn.is_respawning() && report.state.position.y < settings.kill_height;
            if fell {
                health.take_damage(health.max);
            }

            let mut ctx = RespawnContext {
                player: &mut rig.controller,
                score: &mut score,
                health: &mut health,
                camera: &mut camera,
                effects: &mut effects,
            };
            advance_respawn(&mut respawn, fell, dt, &mut ctx)?;

            camera.update(rig.controller.state().position, dt);

            if tick % 60 == 0 {
                let state = rig.controller.state();
                info!(
                    tick,
                    x = state.position.x,
                    y = state.position.y,
                    vx = state.velocity.x,
                    vy = state.velocity.y,
                    grounded = state.grounded,
                    facing = ?state.facing,
                    "player"
                );
            }
            debug!(tick, anim = ?rig.controller.state().animation_params(), "animator");
            tick += 1;
        }
    }

    info!(
        ticks = time.tick_count,
        score = score.points,
        projectiles = projectiles.spawned.len(),
        effects = effects.spawned.len(),
        "Session finished"
    );
    Ok(())
}

/// Start a respawn on the tick the player dies, otherwise run the countdown.
///
/// The countdown starts on the tick after the trigger, so the player stays
/// frozen for the whole delay.
fn advance_respawn(
    respawn: &mut RespawnSequencer,
    fell: bool,
    dt: f32,
    ctx: &mut RespawnContext<'_>,
) -> Result<(), RespawnError> {
    if fell {
        respawn.trigger(ctx)
    } else {
        respawn.update(dt, ctx);
        Ok(())
    }
}

/// Run right with two jumps and a burst of throws, ending up in the pit
fn scripted_input(tick: u64, position: Vec2) -> ControlInput {
    let aim_point = position + Vec2::new(6.0, 1.0);
    ControlInput {
        horizontal: 1.0,
        vertical: 0.0,
        jump_held: (40..55).contains(&tick) || (300..310).contains(&tick),
        fire_held: (90..130).contains(&tick),
        aim: Vec2::ZERO,
    }
    .aim_at(position, aim_point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use joyful_game::RespawnConfig;

    #[test]
    fn test_respawn_waits_full_delay() {
        let mut player = MotionController::new(TuningParameters::default(), Vec2::ZERO).unwrap();
        let mut score = Score { points: 0 };
        let mut health = Health::new(3);
        let mut camera = FollowCamera::default();
        let mut effects = EffectLog::default();
        let mut respawn = RespawnSequencer::new(RespawnConfig {
            respawn_delay: 0.5,
            checkpoint: Some(Vec2::new(0.0, 1.0)),
            ..Default::default()
        })
        .unwrap();

        let mut frozen_ticks = 0;
        for tick in 0..4 {
            let mut ctx = RespawnContext {
                player: &mut player,
                score: &mut score,
                health: &mut health,
                camera: &mut camera,
                effects: &mut effects,
            };
            advance_respawn(&mut respawn, tick == 0, 0.25, &mut ctx).unwrap();
            if player.is_frozen() {
                frozen_ticks += 1;
            }
        }

        // Trigger tick plus one countdown tick; the second countdown tick respawns
        assert_eq!(frozen_ticks, 2);
        assert_eq!(player.state().position, Vec2::new(0.0, 1.0));
        assert!(!respawn.is_respawning());
    }
}
