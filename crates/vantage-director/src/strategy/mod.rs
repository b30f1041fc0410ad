//! Framing strategies - per-mode camera placement policies
//!
//! Each framing mode is one implementation of [`FramingStrategy`]: a
//! pure-ish function from (configuration, body sample, kinematic signal)
//! to a desired camera target, look-at point, FOV and orientation
//! policy. The only internal state a strategy may keep is its own blend
//! progress (first person's aim cross-fade, the aim framing's last valid
//! grip direction); nothing global.

use std::fmt;
use std::str::FromStr;

use glam::{Quat, Vec3};

use vantage_core::{BodySample, CameraConfig, VantageError};

use crate::sampler::KinematicSignal;

mod aim;
mod first_person;
mod full_body;
mod shoulder;
mod simple;
mod top_down;

pub use aim::{aim_gate, grip_aligned, AimFraming};
pub use first_person::FirstPersonFraming;
pub use full_body::FullBodyFraming;
pub use shoulder::ShoulderFraming;
pub use simple::SimpleFraming;
pub use top_down::TopDownFraming;

/// Floor/ceiling band for framing heights, as fractions of head height.
pub const HEIGHT_CLAMP_MIN: f32 = 0.2;
pub const HEIGHT_CLAMP_MAX: f32 = 1.2;

/// Clamp a framing height into the floor/ceiling band around the head.
pub fn clamp_framing_height(y: f32, head_height: f32) -> f32 {
    y.clamp(head_height * HEIGHT_CLAMP_MIN, head_height * HEIGHT_CLAMP_MAX)
}

/// The selectable framing modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
    Shoulder,
    FullBody,
    FirstPerson,
    TopDown,
}

impl fmt::Display for CameraMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CameraMode::Shoulder => "shoulder",
            CameraMode::FullBody => "full_body",
            CameraMode::FirstPerson => "first_person",
            CameraMode::TopDown => "top_down",
        };
        f.write_str(name)
    }
}

impl FromStr for CameraMode {
    type Err = VantageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shoulder" => Ok(CameraMode::Shoulder),
            "full_body" | "body" => Ok(CameraMode::FullBody),
            "first_person" | "fps" => Ok(CameraMode::FirstPerson),
            "top_down" | "tactical" => Ok(CameraMode::TopDown),
            other => Err(VantageError::UnknownMode(other.to_string())),
        }
    }
}

/// Which shoulder the mirrored framings sit over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }

    /// Estimate from the lateral radial delta: turning left puts the
    /// camera over the left shoulder.
    #[inline]
    pub fn from_lateral(x: f32) -> Self {
        if x < 0.0 {
            Side::Left
        } else {
            Side::Right
        }
    }
}

/// Lateral side sub-state, stepped by the selector and consulted by the
/// mirrored framings.
///
/// INVARIANT: `side` only changes when a debounced swap commits.
#[derive(Debug, Clone, Copy)]
pub struct SideState {
    pub side: Side,
    /// Destination recorded when the swap began.
    pub pending: Side,
    pub swapping: bool,
}

impl Default for SideState {
    fn default() -> Self {
        SideState {
            side: Side::Right,
            pending: Side::Right,
            swapping: false,
        }
    }
}

/// How the smoother should derive the emitted orientation.
#[derive(Debug, Clone, Copy)]
pub enum RotationPolicy {
    /// Face along the smoothed look vector.
    LookAt,
    /// Blend from the smoothed look toward an explicit orientation.
    Blend { rotation: Quat, weight: f32 },
}

/// One tick's raw framing output, before smoothing.
#[derive(Debug, Clone, Copy)]
pub struct FramingOutput {
    pub position: Vec3,
    pub look_at: Vec3,
    pub fov: f32,
    /// Smoothing time-constant for this framing.
    pub between_time: f32,
    pub rotation: RotationPolicy,
}

/// A camera placement policy.
pub trait FramingStrategy {
    fn evaluate(
        &mut self,
        config: &CameraConfig,
        sample: &BodySample,
        signal: &KinematicSignal,
        sides: &SideState,
        dt: f32,
    ) -> FramingOutput;

    /// Propagate a settings reload. Must not reset blend state.
    fn apply_settings(&mut self, _config: &CameraConfig) {}

    /// Should the avatar's head (or whole avatar) be hidden while this
    /// framing is active?
    fn hides_head(&self) -> bool {
        false
    }

    /// Placed at (or near) the wearer's eyes; exempt from the planar
    /// clearance clamp and never arc-swept.
    fn head_relative(&self) -> bool {
        false
    }

    /// Mirrors left/right with the side state.
    fn mirrors_side(&self) -> bool {
        false
    }

    /// Pivot the arc clamp sweeps around while this framing swaps sides.
    fn anchor(&self, _config: &CameraConfig, sample: &BodySample) -> Vec3 {
        sample.head.position
    }
}
