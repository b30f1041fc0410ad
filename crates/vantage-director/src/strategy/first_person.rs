//! First-person framing with an embedded aim cross-fade
//!
//! Sits at the wearer's eyes and hides the avatar head. When the aim
//! gate holds, the framing cross-fades position, FOV, responsiveness and
//! orientation toward the embedded aim framing via a [0, 1] blend factor
//! that ramps at the configured smoothing rate - holding the gate never
//! snaps, and releasing it ramps back down the same way.

use glam::Vec3;

use vantage_core::{BodySample, CameraConfig};

use super::{aim_gate, AimFraming, FramingOutput, FramingStrategy, RotationPolicy, SideState};
use crate::sampler::KinematicSignal;

#[derive(Debug, Clone)]
pub struct FirstPersonFraming {
    aim: AimFraming,
    blend: f32,
}

impl FirstPersonFraming {
    pub fn new() -> Self {
        FirstPersonFraming {
            aim: AimFraming::new(),
            blend: 0.0,
        }
    }

    /// Current aim cross-fade in [0, 1].
    pub fn blend(&self) -> f32 {
        self.blend
    }

    fn base_position(config: &CameraConfig, sample: &BodySample) -> Vec3 {
        if config.use_eye_position {
            (sample.left_eye + sample.right_eye) * 0.5
        } else {
            sample.head.position
        }
    }
}

impl Default for FirstPersonFraming {
    fn default() -> Self {
        Self::new()
    }
}

impl FramingStrategy for FirstPersonFraming {
    fn evaluate(
        &mut self,
        config: &CameraConfig,
        sample: &BodySample,
        signal: &KinematicSignal,
        sides: &SideState,
        dt: f32,
    ) -> FramingOutput {
        let gated = !config.disable_aim_camera
            && aim_gate(config, sample, signal, config.aim_align_blend_scale);
        let rate = dt / config.aim_smoothing.max(1e-3);
        self.blend = if gated {
            (self.blend + rate).min(1.0)
        } else {
            (self.blend - rate).max(0.0)
        };

        let position = Self::base_position(config, sample);
        let forward = sample.head.transform_point(Vec3::new(0.0, 0.0, 1.0));

        if self.blend <= 0.0 {
            return FramingOutput {
                position,
                look_at: forward,
                fov: config.default_fov,
                between_time: config.first_person_positioning_time,
                rotation: RotationPolicy::LookAt,
            };
        }

        let aim = self.aim.evaluate(config, sample, signal, sides, dt);
        let aim_rotation = match aim.rotation {
            RotationPolicy::Blend { rotation, .. } => rotation,
            RotationPolicy::LookAt => sample.head.rotation,
        };

        FramingOutput {
            position: position.lerp(aim.position, self.blend),
            look_at: forward.lerp(aim.look_at, self.blend),
            fov: config.default_fov + (aim.fov - config.default_fov) * self.blend,
            between_time: config.first_person_positioning_time
                + (aim.between_time - config.first_person_positioning_time) * self.blend,
            rotation: RotationPolicy::Blend {
                rotation: aim_rotation,
                weight: self.blend,
            },
        }
    }

    fn hides_head(&self) -> bool {
        true
    }

    fn head_relative(&self) -> bool {
        true
    }
}
