//! Gravity curve sampling
//!
//! Maps normalized fall time to a gravity multiplier. Samples outside [0, 1]
//! are clamped to the curve's end points, never extrapolated.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Anything that can be evaluated at normalized time `t` to get a multiplier
pub trait CurveSample {
    fn evaluate(&self, t: f32) -> f32;
}

impl<F: Fn(f32) -> f32> CurveSample for F {
    fn evaluate(&self, t: f32) -> f32 {
        self(t.clamp(0.0, 1.0))
    }
}

/// One curve keyframe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    pub time: f32,
    pub value: f32,
}

impl CurveKey {
    pub const fn new(time: f32, value: f32) -> Self {
        Self { time, value }
    }
}

/// Piecewise-linear, non-decreasing keyframe curve over [0, 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CurveKey>", into = "Vec<CurveKey>")]
pub struct GravityCurve {
    keys: Vec<CurveKey>,
}

impl GravityCurve {
    /// Build a curve from keyframes sorted by time
    pub fn new(keys: Vec<CurveKey>) -> Result<Self, ConfigError> {
        if keys.is_empty() {
            return Err(ConfigError::InvalidCurve("curve has no keys".into()));
        }
        for key in &keys {
            if !key.time.is_finite() || !key.value.is_finite() {
                return Err(ConfigError::InvalidCurve(format!(
                    "non-finite key ({}, {})",
                    key.time, key.value
                )));
            }
        }
        for pair in keys.windows(2) {
            if pair[1].time <= pair[0].time {
                return Err(ConfigError::InvalidCurve(format!(
                    "key times must strictly increase ({} then {})",
                    pair[0].time, pair[1].time
                )));
            }
            if pair[1].value < pair[0].value {
                return Err(ConfigError::InvalidCurve(format!(
                    "curve must be monotonic ({} then {})",
                    pair[0].value, pair[1].value
                )));
            }
        }
        Ok(Self { keys })
    }

    /// A flat curve
    pub fn constant(value: f32) -> Self {
        Self {
            keys: vec![CurveKey::new(0.0, value)],
        }
    }

    /// A straight ramp from `start` at t=0 to `end` at t=1
    pub fn linear(start: f32, end: f32) -> Result<Self, ConfigError> {
        Self::new(vec![CurveKey::new(0.0, start), CurveKey::new(1.0, end)])
    }

    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }
}

impl Default for GravityCurve {
    /// Gentle ramp from normal to doubled gravity over the fall
    fn default() -> Self {
        Self {
            keys: vec![
                CurveKey::new(0.0, 1.0),
                CurveKey::new(0.5, 1.25),
                CurveKey::new(1.0, 2.0),
            ],
        }
    }
}

impl CurveSample for GravityCurve {
    fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        let first = self.keys[0];
        if t <= first.time {
            return first.value;
        }

        for pair in self.keys.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.time {
                let s = (t - a.time) / (b.time - a.time);
                return a.value + (b.value - a.value) * s;
            }
        }

        self.keys[self.keys.len() - 1].value
    }
}

impl TryFrom<Vec<CurveKey>> for GravityCurve {
    type Error = ConfigError;

    fn try_from(keys: Vec<CurveKey>) -> Result<Self, Self::Error> {
        Self::new(keys)
    }
}

impl From<GravityCurve> for Vec<CurveKey> {
    fn from(curve: GravityCurve) -> Self {
        curve.keys
    }
}
