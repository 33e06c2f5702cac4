//! Joyful Core - Core types and utilities shared by the Joyful crates
//!
//! This crate provides the foundational types used throughout the workspace:
//! - Mathematical primitives (re-exported from glam)
//! - Entity identifiers and facing direction
//! - Fixed-step game time that drives the simulation tick

pub mod time;
pub mod types;

pub use glam::Vec2;
pub use time::{GameTime, TimeConfig};
pub use types::{EntityId, Facing};
