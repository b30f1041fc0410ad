//! Simple framing - a fixed head-relative offset
//!
//! The building block the richer framings fall back to: a small local
//! offset from the head, looking just past it. Also serves as the
//! neutral "in-between" framing substituted while a mirrored framing
//! swaps sides, so the camera never sweeps through the avatar.

use glam::Vec3;

use vantage_core::{BodySample, CameraConfig};

use super::{clamp_framing_height, FramingOutput, FramingStrategy, RotationPolicy, SideState};
use crate::sampler::KinematicSignal;

const LOOK_OFFSET: Vec3 = Vec3::new(0.0, 0.0, 0.1);

#[derive(Debug, Clone)]
pub struct SimpleFraming {
    offset: Vec3,
    positioning_time: f32,
}

impl SimpleFraming {
    pub fn new(offset: Vec3, positioning_time: f32) -> Self {
        SimpleFraming {
            offset,
            positioning_time,
        }
    }

    pub fn set_positioning_time(&mut self, positioning_time: f32) {
        self.positioning_time = positioning_time;
    }
}

impl FramingStrategy for SimpleFraming {
    fn evaluate(
        &mut self,
        config: &CameraConfig,
        sample: &BodySample,
        _signal: &KinematicSignal,
        _sides: &SideState,
        _dt: f32,
    ) -> FramingOutput {
        let mut position = sample.head.transform_point(self.offset);
        position.y = clamp_framing_height(position.y, sample.head.position.y);

        // Blend head- and waist-relative forward points so a tilted head
        // does not pitch the framing with it.
        let head_look = sample.head.transform_point(LOOK_OFFSET);
        let waist_look = sample.waist.transform_point(LOOK_OFFSET);
        let mut look_at = head_look.lerp(waist_look, 0.5);
        if config.vertical_lock {
            // Pin the look height to a chest estimate.
            look_at.y = (sample.head.position.y + sample.waist.position.y) * 0.5;
        }

        FramingOutput {
            position,
            look_at,
            fov: config.default_fov,
            between_time: self.positioning_time,
            rotation: RotationPolicy::LookAt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::PoseSampler;

    fn eval(config: &CameraConfig, sample: &BodySample) -> FramingOutput {
        let mut sampler = PoseSampler::new(config);
        let signal = sampler.update(sample, 1.0 / 60.0);
        SimpleFraming::new(Vec3::new(0.0, 0.5, -1.0), 0.8).evaluate(
            config,
            sample,
            &signal,
            &SideState::default(),
            1.0 / 60.0,
        )
    }

    #[test]
    fn position_stays_in_height_band() {
        let config = CameraConfig::default();
        let mut sample = BodySample::standing(1.7);
        sample.head.position.y = 0.1; // crouched to the floor
        let out = eval(&config, &sample);
        assert!(out.position.y >= 0.1 * clamp_framing_height(0.0, 1.0));
        assert!(out.position.y <= 0.1 * 1.2 + 1e-5);
    }

    #[test]
    fn vertical_lock_pins_look_height() {
        let config = CameraConfig {
            vertical_lock: true,
            ..CameraConfig::default()
        };
        let sample = BodySample::standing(1.7);
        let out = eval(&config, &sample);
        let chest = (sample.head.position.y + sample.waist.position.y) * 0.5;
        assert!((out.look_at.y - chest).abs() < 1e-5);
    }
}
