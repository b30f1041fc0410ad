//! Full-body framing
//!
//! The same mirrored trigonometric placement as the shoulder framing but
//! tuned to keep the whole avatar in frame: its own distance and angle,
//! and a look-at pitched down toward the waist.

use glam::Vec3;

use vantage_core::{BodySample, CameraConfig};

use super::{
    clamp_framing_height, FramingOutput, FramingStrategy, RotationPolicy, SideState, SimpleFraming,
};
use crate::sampler::KinematicSignal;

const NEUTRAL_OFFSET: Vec3 = Vec3::new(0.0, 0.5, -0.5);

#[derive(Debug, Clone)]
pub struct FullBodyFraming {
    between: SimpleFraming,
}

impl FullBodyFraming {
    pub fn new(config: &CameraConfig) -> Self {
        FullBodyFraming {
            between: SimpleFraming::new(NEUTRAL_OFFSET, config.body_positioning_time * 0.5),
        }
    }

    fn center(config: &CameraConfig, sample: &BodySample) -> Vec3 {
        let height = if config.use_waist_height {
            sample.waist.position.y
        } else {
            sample.head.position.y
        };
        if config.body_use_room_origin {
            Vec3::new(0.0, height, 0.0)
        } else {
            Vec3::new(sample.head.position.x, height, sample.head.position.z)
        }
    }
}

impl FramingStrategy for FullBodyFraming {
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

        let mut offset = config.body_offset();
        let reverse = if config.reverse_body { -1.0 } else { 1.0 };
        offset.x = -sides.side.sign() * offset.x.abs() * reverse;

        let mut position = if config.body_follow_gaze {
            sample.head.transform_point(offset)
        } else {
            Self::center(config, sample) + offset
        };
        position.y = clamp_framing_height(position.y, sample.head.position.y);

        // Halfway between the waist and a head-relative forward point, so
        // both ends of the avatar stay in frame.
        let forward = sample.head.transform_point(Vec3::new(
            0.0,
            config.body_vertical_target_offset,
            config.body_look_at_forward,
        ));
        let look_at = (sample.waist.position + forward) * 0.5;

        FramingOutput {
            position,
            look_at,
            fov: config.default_fov,
            between_time: config.body_positioning_time,
            rotation: RotationPolicy::LookAt,
        }
    }

    fn apply_settings(&mut self, config: &CameraConfig) {
        self.between
            .set_positioning_time(config.body_positioning_time * 0.5);
    }

    fn mirrors_side(&self) -> bool {
        true
    }

    fn anchor(&self, config: &CameraConfig, sample: &BodySample) -> Vec3 {
        Self::center(config, sample)
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
        FullBodyFraming::new(config).evaluate(config, &sample, &signal, sides, 1.0 / 60.0)
    }

    #[test]
    fn look_at_sits_between_waist_and_head_forward() {
        let config = CameraConfig::default();
        let sample = BodySample::standing(1.7);
        let out = eval(&config, &SideState::default());
        assert!(out.look_at.y > sample.waist.position.y * 0.5);
        assert!(out.look_at.y < sample.head.position.y + config.body_vertical_target_offset);
    }

    #[test]
    fn uses_body_trig_parameters() {
        let config = CameraConfig::default();
        let out = eval(&config, &SideState::default());
        let sample = BodySample::standing(1.7);
        let planar = (out.position - sample.head.position) * Vec3::new(1.0, 0.0, 1.0);
        assert!((planar.length() - config.body_distance).abs() < 0.05);
    }

    #[test]
    fn side_mirroring_applies() {
        let config = CameraConfig::default();
        let right = eval(&config, &SideState::default());
        let left = eval(
            &config,
            &SideState {
                side: Side::Left,
                pending: Side::Left,
                swapping: false,
            },
        );
        assert!((right.position.x + left.position.x).abs() < 1e-4);
    }

    #[test]
    fn between_framing_responds_at_half_the_positioning_time() {
        let config = CameraConfig {
            body_positioning_time: 4.0,
            ..CameraConfig::default()
        };
        let swapping = SideState {
            side: Side::Right,
            pending: Side::Left,
            swapping: true,
        };
        let out = eval(&config, &swapping);
        assert!((out.between_time - 2.0).abs() < 1e-6);
    }

    #[test]
    fn waist_height_anchor_option() {
        let config = CameraConfig {
            use_waist_height: true,
            body_follow_gaze: false,
            ..CameraConfig::default()
        };
        let sample = BodySample::standing(1.7);
        let anchor = FullBodyFraming::new(&config).anchor(&config, &sample);
        assert!((anchor.y - sample.waist.position.y).abs() < 1e-5);
    }
}
