//! Over-the-shoulder framing
//!
//! Sits behind one shoulder at a configured distance and angle, looking
//! forward past the wearer. The active side is mirrored by the selector's
//! side state; while a side swap is in flight the neutral framing is
//! substituted so the camera lifts over the avatar instead of cutting
//! through it.

use glam::Vec3;

use vantage_core::{BodySample, CameraConfig};

use super::{
    clamp_framing_height, FramingOutput, FramingStrategy, RotationPolicy, SideState, SimpleFraming,
};
use crate::sampler::KinematicSignal;

const LOOK_OFFSET: Vec3 = Vec3::new(0.0, 0.0, 5.0);
const NEUTRAL_OFFSET: Vec3 = Vec3::new(0.0, 0.5, -0.5);

#[derive(Debug, Clone)]
pub struct ShoulderFraming {
    between: SimpleFraming,
}

impl ShoulderFraming {
    pub fn new(config: &CameraConfig) -> Self {
        ShoulderFraming {
            between: SimpleFraming::new(NEUTRAL_OFFSET, config.shoulder_positioning_time * 0.5),
        }
    }

    fn center(config: &CameraConfig, sample: &BodySample) -> Vec3 {
        if config.shoulder_use_room_origin {
            Vec3::new(0.0, sample.head.position.y, 0.0)
        } else {
            sample.head.position
        }
    }
}

impl FramingStrategy for ShoulderFraming {
    fn evaluate(
        &mut self,
        config: &CameraConfig,
        sample: &BodySample,
        signal: &KinematicSignal,
        sides: &SideState,
        dt: f32,
    ) -> FramingOutput {
        if sides.swapping && config.between_camera_enabled {
            return self.between.evaluate(config, sample, signal, sides, dt);
        }

        let mut offset = config.shoulder_offset();
        let reverse = if config.reverse_shoulder { -1.0 } else { 1.0 };
        offset.x = -sides.side.sign() * offset.x.abs() * reverse;

        let mut position = if config.shoulder_follow_gaze {
            sample.head.transform_point(offset)
        } else {
            Self::center(config, sample) + offset
        };
        position.y = clamp_framing_height(position.y, sample.head.position.y);

        FramingOutput {
            position,
            look_at: sample.head.transform_point(LOOK_OFFSET),
            fov: config.default_fov,
            between_time: config.shoulder_positioning_time,
            rotation: RotationPolicy::LookAt,
        }
    }

    fn apply_settings(&mut self, config: &CameraConfig) {
        self.between
            .set_positioning_time(config.shoulder_positioning_time * 0.5);
    }

    fn mirrors_side(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::PoseSampler;
    use crate::strategy::Side;

    fn eval(config: &CameraConfig, sides: &SideState) -> FramingOutput {
        let sample = BodySample::standing(1.7);
        let mut sampler = PoseSampler::new(config);
        let signal = sampler.update(&sample, 1.0 / 60.0);
        ShoulderFraming::new(config).evaluate(config, &sample, &signal, sides, 1.0 / 60.0)
    }

    #[test]
    fn sides_mirror_position() {
        let config = CameraConfig::default();
        let right = eval(
            &config,
            &SideState {
                side: Side::Right,
                ..SideState::default()
            },
        );
        let left = eval(
            &config,
            &SideState {
                side: Side::Left,
                pending: Side::Left,
                swapping: false,
            },
        );
        assert!((right.position.x + left.position.x).abs() < 1e-4);
        assert!((right.position.z - left.position.z).abs() < 1e-4);
    }

    #[test]
    fn reverse_flag_flips_side() {
        let sides = SideState::default();
        let normal = eval(&CameraConfig::default(), &sides);
        let reversed = eval(
            &CameraConfig {
                reverse_shoulder: true,
                ..CameraConfig::default()
            },
            &sides,
        );
        assert!((normal.position.x + reversed.position.x).abs() < 1e-4);
    }

    #[test]
    fn swap_substitutes_neutral_framing() {
        let config = CameraConfig::default();
        let swapping = SideState {
            side: Side::Right,
            pending: Side::Left,
            swapping: true,
        };
        let out = eval(&config, &swapping);
        // Neutral framing sits on the centerline, not over a shoulder.
        assert!(out.position.x.abs() < 1e-4);
    }

    #[test]
    fn between_framing_responds_at_half_the_positioning_time() {
        let config = CameraConfig {
            shoulder_positioning_time: 3.0,
            ..CameraConfig::default()
        };
        let swapping = SideState {
            side: Side::Right,
            pending: Side::Left,
            swapping: true,
        };
        let out = eval(&config, &swapping);
        assert!((out.between_time - 1.5).abs() < 1e-6);

        // A settings reload rederives the halved time.
        let mut framing = ShoulderFraming::new(&config);
        let faster = CameraConfig {
            shoulder_positioning_time: 1.0,
            ..CameraConfig::default()
        };
        framing.apply_settings(&faster);
        let sample = BodySample::standing(1.7);
        let mut sampler = PoseSampler::new(&faster);
        let signal = sampler.update(&sample, 1.0 / 60.0);
        let out = framing.evaluate(&faster, &sample, &signal, &swapping, 1.0 / 60.0);
        assert!((out.between_time - 0.5).abs() < 1e-6);
    }

    #[test]
    fn room_fixed_placement_ignores_gaze() {
        let config = CameraConfig {
            shoulder_follow_gaze: false,
            shoulder_use_room_origin: true,
            ..CameraConfig::default()
        };
        let out = eval(&config, &SideState::default());
        let offset = config.shoulder_offset();
        assert!((out.position.z - offset.z).abs() < 1e-4);
    }

    #[test]
    fn position_height_clamped() {
        let config = CameraConfig::default();
        let out = eval(&config, &SideState::default());
        assert!(out.position.y <= 1.7 * 1.2 + 1e-5);
        assert!(out.position.y >= 1.7 * 0.2 - 1e-5);
    }
}
