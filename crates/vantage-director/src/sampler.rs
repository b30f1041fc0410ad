//! Pose sampler - derived kinematic signals
//!
//! Turns the raw tracked transforms into the signals the rest of the
//! engine keys off. The central trick is the "radial delta": instead of
//! differentiating orientation (too noisy at tracking rates), we keep a
//! critically damped copy of each joint's forward probe point and take
//! the difference to the instantaneous probe, expressed in the joint's
//! local frame. The result approximates how fast, and in which local
//! direction, the wearer is turning.

use glam::Vec3;

use vantage_core::{smooth_damp_vec3, BodySample, CameraConfig, Pose};

/// Time constant of the damped reference points. Deliberately fixed: the
/// proxy-derivative tuning depends on it.
const REFERENCE_DAMP_TIME: f32 = 0.3;

/// Derived per-tick kinematic quantities. No persistent identity.
#[derive(Debug, Clone, Copy)]
pub struct KinematicSignal {
    /// Head turn proxy, in the head's local frame. `x` is lateral,
    /// `y` vertical.
    pub head_radial: Vec3,
    pub left_hand_radial: Vec3,
    pub right_hand_radial: Vec3,

    /// Midpoint of both hands, when both are tracked.
    pub hand_average: Option<Vec3>,
    pub hand_separation: Option<f32>,

    /// Probe points in world space.
    pub head_forward_point: Vec3,
    /// Forward probes angled out by the horizontal offset, for gaze-side
    /// estimation.
    pub head_forward_left_point: Vec3,
    pub head_forward_right_point: Vec3,
    pub head_above_point: Vec3,
    pub head_below_point: Vec3,
}

/// Maintains the damped reference points across ticks.
#[derive(Debug, Clone)]
pub struct PoseSampler {
    above_offset: Vec3,
    forward_offset: Vec3,
    forward_left_offset: Vec3,
    forward_right_offset: Vec3,

    damped_head: Vec3,
    damped_left: Vec3,
    damped_right: Vec3,
    head_velocity: Vec3,
    left_velocity: Vec3,
    right_velocity: Vec3,
    initialized: bool,
}

impl PoseSampler {
    pub fn new(config: &CameraConfig) -> Self {
        let mut sampler = PoseSampler {
            above_offset: Vec3::ZERO,
            forward_offset: Vec3::ZERO,
            forward_left_offset: Vec3::ZERO,
            forward_right_offset: Vec3::ZERO,
            damped_head: Vec3::ZERO,
            damped_left: Vec3::ZERO,
            damped_right: Vec3::ZERO,
            head_velocity: Vec3::ZERO,
            left_velocity: Vec3::ZERO,
            right_velocity: Vec3::ZERO,
            initialized: false,
        };
        sampler.set_offsets(config);
        sampler
    }

    /// Recompute the probe offsets from configuration. Does not disturb
    /// the damped references, so hot-reload never kicks the camera.
    pub fn set_offsets(&mut self, config: &CameraConfig) {
        self.above_offset = Vec3::new(0.0, config.forward_vertical_offset.max(0.05), 0.0);
        self.forward_offset = Vec3::new(0.0, 0.0, config.forward_distance);
        self.forward_left_offset = Vec3::new(
            -config.forward_horizontal_offset,
            config.forward_vertical_offset,
            config.forward_distance,
        );
        self.forward_right_offset = Vec3::new(
            config.forward_horizontal_offset,
            config.forward_vertical_offset,
            config.forward_distance,
        );
    }

    /// Consume the tick's body sample and produce the kinematic signal.
    /// Always succeeds; untracked hands freeze their reference and read
    /// as zero radial delta.
    pub fn update(&mut self, sample: &BodySample, dt: f32) -> KinematicSignal {
        let head_forward_point = sample.head.transform_point(self.forward_offset);
        let left_forward_point = sample
            .left_hand
            .map(|hand| hand.transform_point(self.forward_offset));
        let right_forward_point = sample
            .right_hand
            .map(|hand| hand.transform_point(self.forward_offset));

        if !self.initialized {
            self.damped_head = head_forward_point;
            self.damped_left = left_forward_point.unwrap_or(head_forward_point);
            self.damped_right = right_forward_point.unwrap_or(head_forward_point);
            self.initialized = true;
        }

        let head_radial = radial_delta(&sample.head, head_forward_point, self.damped_head);
        let left_hand_radial = match (&sample.left_hand, left_forward_point) {
            (Some(hand), Some(point)) => radial_delta(hand, point, self.damped_left),
            _ => Vec3::ZERO,
        };
        let right_hand_radial = match (&sample.right_hand, right_forward_point) {
            (Some(hand), Some(point)) => radial_delta(hand, point, self.damped_right),
            _ => Vec3::ZERO,
        };

        self.damped_head = smooth_damp_vec3(
            self.damped_head,
            head_forward_point,
            &mut self.head_velocity,
            REFERENCE_DAMP_TIME,
            dt,
        );
        if let Some(point) = left_forward_point {
            self.damped_left = smooth_damp_vec3(
                self.damped_left,
                point,
                &mut self.left_velocity,
                REFERENCE_DAMP_TIME,
                dt,
            );
        }
        if let Some(point) = right_forward_point {
            self.damped_right = smooth_damp_vec3(
                self.damped_right,
                point,
                &mut self.right_velocity,
                REFERENCE_DAMP_TIME,
                dt,
            );
        }

        KinematicSignal {
            head_radial,
            left_hand_radial,
            right_hand_radial,
            hand_average: sample.hand_average(),
            hand_separation: sample.hand_separation(),
            head_forward_point,
            head_forward_left_point: sample.head.transform_point(self.forward_left_offset),
            head_forward_right_point: sample.head.transform_point(self.forward_right_offset),
            head_above_point: sample.head.position + self.above_offset,
            head_below_point: sample.head.position - self.above_offset,
        }
    }
}

fn radial_delta(joint: &Pose, forward_point: Vec3, damped_point: Vec3) -> Vec3 {
    joint.inverse_transform_point(forward_point) - joint.inverse_transform_point(damped_point)
}
