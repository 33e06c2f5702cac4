//! Player motion module
//!
//! A 2D platformer controller: gravity curve, aerial drift, knockback,
//! ladders and projectile fire gating.

mod controller;
mod curve;
mod state;
mod tuning;

pub use controller::MotionController;
pub use curve::{CurveKey, CurveSample, GravityCurve};
pub use state::{AnimationParams, ControlInput, MotionState, StepOutcome};
pub use tuning::TuningParameters;
