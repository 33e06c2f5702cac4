//! Fixed-step tick source for Joyful
//!
//! Turns variable frame deltas into a count of fixed simulation ticks. The
//! player controller and the respawn sequencer are both advanced by these
//! ticks, never by wall-clock sleeps.

use serde::{Deserialize, Serialize};

/// Configuration for game time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// How many in-game seconds pass per real second
    pub time_scale: f32,
    /// Fixed timestep for the simulation (in seconds)
    pub fixed_timestep: f32,
    /// Largest frame delta accepted, so a stall cannot queue a burst of ticks
    pub max_delta_time: f32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            fixed_timestep: 1.0 / 60.0,
            max_delta_time: 0.25,
        }
    }
}

/// Accumulates frame time and hands it out as whole fixed ticks
#[derive(Debug, Clone, Default)]
pub struct GameTime {
    pub config: TimeConfig,
    /// Fixed ticks handed out so far
    pub tick_count: u64,
    accumulator: f32,
}

impl GameTime {
    pub fn new(config: TimeConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Bank the raw delta of the previous frame
    pub fn update(&mut self, raw_delta: f32) {
        let delta = raw_delta.clamp(0.0, self.config.max_delta_time) * self.config.time_scale;
        self.accumulator += delta;
    }

    /// Drain the banked time into whole ticks
    pub fn fixed_steps(&mut self) -> u32 {
        let mut steps = 0;
        while self.accumulator >= self.config.fixed_timestep {
            self.accumulator -= self.config.fixed_timestep;
            steps += 1;
        }
        self.tick_count += steps as u64;
        steps
    }

    /// Length of one fixed tick in seconds
    pub fn fixed_delta(&self) -> f32 {
        self.config.fixed_timestep
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tenth_second() -> GameTime {
        GameTime::new(TimeConfig {
            fixed_timestep: 0.1,
            ..Default::default()
        })
    }

    #[test]
    fn test_fixed_steps_accumulate() {
        let mut time = tenth_second();

        time.update(0.25);
        assert_eq!(time.fixed_steps(), 2);
        assert_eq!(time.fixed_steps(), 0);

        time.update(0.06);
        assert_eq!(time.fixed_steps(), 1);
        assert_eq!(time.tick_count, 3);
    }

    #[test]
    fn test_large_deltas_are_clamped() {
        let mut time = tenth_second();
        time.update(5.0);
        assert_eq!(time.fixed_steps(), 2);
    }

    #[test]
    fn test_time_scale_stretches_ticks() {
        let mut time = GameTime::new(TimeConfig {
            time_scale: 0.5,
            fixed_timestep: 0.1,
            ..Default::default()
        });
        time.update(0.25);
        assert_eq!(time.fixed_steps(), 1);
        assert_eq!(time.fixed_delta(), 0.1);
    }
}
