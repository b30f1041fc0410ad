//! Trajectory smoother - from raw framing targets to an emitted pose
//!
//! Critically damped smoothing on position and look-at, then two
//! corrections in a fixed order: the side-swap arc clamp (sweep the
//! camera around the wearer on a constant-radius circle instead of a
//! straight line through them), then the minimum-clearance clamp.
//! Clearance always runs after the arc so a too-close swap can never
//! end inside the avatar.

use glam::{Quat, Vec3};

use vantage_core::{
    clamp_to_circle, look_rotation, planar_distance, smooth_damp, smooth_damp_vec3, CameraConfig,
};

use crate::strategy::{FramingOutput, RotationPolicy};

/// Per-tick smoothing context assembled by the director.
#[derive(Debug, Clone, Copy)]
pub struct SmoothingContext {
    /// Pivot the arc clamp sweeps around.
    pub anchor: Vec3,
    pub head_position: Vec3,
    /// Radius recorded when the active side swap began; `None` when no
    /// arc correction applies this tick.
    pub arc_radius: Option<f32>,
    /// Whether the planar clearance clamp applies (neither the active
    /// nor the previous framing is head-relative).
    pub clearance_applies: bool,
}

/// The emitted camera pose.
#[derive(Debug, Clone, Copy)]
pub struct SmoothedPose {
    pub position: Vec3,
    pub rotation: Quat,
    pub fov: f32,
}

#[derive(Debug, Clone)]
pub struct TrajectorySmoother {
    position: Vec3,
    look_at: Vec3,
    velocity: Vec3,
    look_velocity: Vec3,
    saved_velocity: Vec3,
    saved_look_velocity: Vec3,
    fov: f32,
    fov_velocity: f32,
    initialized: bool,
}

impl TrajectorySmoother {
    pub fn new(config: &CameraConfig) -> Self {
        TrajectorySmoother {
            position: Vec3::ZERO,
            look_at: Vec3::Z,
            velocity: Vec3::ZERO,
            look_velocity: Vec3::ZERO,
            saved_velocity: Vec3::ZERO,
            saved_look_velocity: Vec3::ZERO,
            fov: config.default_fov,
            fov_velocity: 0.0,
            initialized: false,
        }
    }

    /// Current smoothed camera position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Save the in-flight velocities without disturbing the pose, so a
    /// later `snap(.., true)` can resume the interrupted motion.
    pub fn stash_velocities(&mut self) {
        self.saved_velocity = self.velocity;
        self.saved_look_velocity = self.look_velocity;
    }

    /// Jump straight to a framing target. Saves the in-flight velocities
    /// so a later `revert` snap can resume the interrupted motion - used
    /// when aim mode preempts and then restores a framing.
    pub fn snap(&mut self, target: &FramingOutput, revert: bool) {
        if revert {
            self.velocity = self.saved_velocity;
            self.look_velocity = self.saved_look_velocity;
        } else {
            self.saved_velocity = self.velocity;
            self.saved_look_velocity = self.look_velocity;
            self.velocity = Vec3::ZERO;
            self.look_velocity = Vec3::ZERO;
        }
        self.position = target.position;
        self.look_at = target.look_at;
        self.initialized = true;
    }

    /// Advance one tick toward the framing target and emit the pose.
    pub fn advance(
        &mut self,
        config: &CameraConfig,
        target: &FramingOutput,
        context: &SmoothingContext,
        dt: f32,
    ) -> SmoothedPose {
        if !self.initialized {
            self.position = target.position;
            self.look_at = target.look_at;
            self.fov = target.fov;
            self.initialized = true;
        }

        self.position = smooth_damp_vec3(
            self.position,
            target.position,
            &mut self.velocity,
            target.between_time,
            dt,
        );
        self.look_at = smooth_damp_vec3(
            self.look_at,
            target.look_at,
            &mut self.look_velocity,
            target.between_time,
            dt,
        );

        if let Some(radius) = context.arc_radius {
            self.position = reproject(self.position, context.anchor, radius);
        }

        if context.clearance_applies
            && planar_distance(self.position, context.head_position) < config.minimum_camera_distance
        {
            self.position = reproject(
                self.position,
                context.head_position,
                config.minimum_camera_distance,
            );
        }

        self.fov = if config.fov_lerp {
            smooth_damp(
                self.fov,
                target.fov,
                &mut self.fov_velocity,
                target.between_time,
                dt,
            )
        } else {
            target.fov
        };

        let look_direction = self.look_at - self.position;
        let rotation = match target.rotation {
            RotationPolicy::LookAt => look_rotation(look_direction, Vec3::Y),
            RotationPolicy::Blend { rotation, weight } => look_rotation(look_direction, Vec3::Y)
                .slerp(rotation, weight.clamp(0.0, 1.0)),
        };

        SmoothedPose {
            position: self.position,
            rotation,
            fov: self.fov,
        }
    }
}

/// Re-project a point onto a horizontal circle around `pivot`, keeping
/// the independently damped vertical component.
fn reproject(position: Vec3, pivot: Vec3, radius: f32) -> Vec3 {
    let relative = position - pivot;
    let planar = clamp_to_circle(relative, radius);
    if planar == relative {
        // Degenerate: no horizontal extent to re-project.
        return position;
    }
    pivot + Vec3::new(planar.x, relative.y, planar.z)
}
