//! VANTAGE Core - Fundamental types for the director camera
//!
//! This crate defines the types shared across the engine:
//! - Pose primitives (position + orientation) and tracked body samples
//! - Timer bank (debounce / hysteresis counters)
//! - Camera configuration with safe-range clamping
//! - Geometry helpers (critically damped smoothing, planar clamps)

pub mod config;
pub mod error;
pub mod math;
pub mod pose;
pub mod time;

pub use config::*;
pub use error::*;
pub use math::*;
pub use pose::*;
pub use time::*;
