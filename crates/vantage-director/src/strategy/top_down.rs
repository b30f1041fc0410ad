//! Top-down framing
//!
//! Hangs a configured height above the head, looking straight down at
//! it. Mostly picked by the weighted draw on the upward gesture.

use glam::Vec3;

use vantage_core::{BodySample, CameraConfig};

use super::{FramingOutput, FramingStrategy, RotationPolicy, SideState};
use crate::sampler::KinematicSignal;

#[derive(Debug, Clone, Default)]
pub struct TopDownFraming;

impl FramingStrategy for TopDownFraming {
    fn evaluate(
        &mut self,
        config: &CameraConfig,
        sample: &BodySample,
        _signal: &KinematicSignal,
        _sides: &SideState,
        _dt: f32,
    ) -> FramingOutput {
        let position = sample.head.position + Vec3::new(0.0, config.top_down_height, 0.0);
        FramingOutput {
            position,
            look_at: sample.head.position,
            fov: config.default_fov,
            between_time: config.top_down_positioning_time,
            rotation: RotationPolicy::LookAt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::PoseSampler;

    #[test]
    fn hangs_above_the_head() {
        let config = CameraConfig::default();
        let sample = BodySample::standing(1.7);
        let mut sampler = PoseSampler::new(&config);
        let signal = sampler.update(&sample, 1.0 / 60.0);
        let out = TopDownFraming.evaluate(
            &config,
            &sample,
            &signal,
            &SideState::default(),
            1.0 / 60.0,
        );
        assert!((out.position.y - sample.head.position.y - config.top_down_height).abs() < 1e-5);
        assert_eq!(out.look_at, sample.head.position);
    }
}
