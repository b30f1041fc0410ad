//! Aim-down-sights framing and its gating predicate
//!
//! Places the camera at the dominant eye and derives the look direction
//! from the vector between the two hands, simulating sighting down a
//! two-handed grip. When the grip is compact the off hand's vertical
//! contribution is attenuated, otherwise small vertical hand jitter
//! whips the look direction around.

use glam::Vec3;

use vantage_core::{cone_alignment_deg, look_rotation, BodySample, CameraConfig, Handedness, Pose};

use super::{FramingOutput, FramingStrategy, RotationPolicy, SideState};
use crate::sampler::KinematicSignal;

/// Head-local probe points used by the alignment cone.
const HEAD_TOP_OFFSET: Vec3 = Vec3::new(0.0, 0.05, 0.0);
const HEAD_BACK_OFFSET: Vec3 = Vec3::new(0.0, 0.0, -0.1);
/// How far past the hands the aim probe point is projected.
const AIM_PROBE_REACH: f32 = 2.0;

/// The aim gate: every condition that must hold for the wearer to count
/// as sighting down a two-handed grip. `align_scale` widens or narrows
/// the alignment cone; the selector uses a wider cone to enter than to
/// hold, which is the hysteresis that stops flapping at the boundary.
///
/// Any untracked hand fails the gate.
pub fn aim_gate(
    config: &CameraConfig,
    sample: &BodySample,
    signal: &KinematicSignal,
    align_scale: f32,
) -> bool {
    let (Some(left), Some(right), Some(separation)) = (
        sample.left_hand,
        sample.right_hand,
        signal.hand_separation,
    ) else {
        return false;
    };

    let head_ref = sample.head.transform_point(HEAD_TOP_OFFSET);
    let floor = head_ref.y - config.aim_hand_height_drop;
    if left.position.y < floor || right.position.y < floor {
        return false;
    }

    if separation < config.aim_min_two_handed_distance
        || separation > config.aim_max_two_handed_distance
    {
        return false;
    }

    // Rear grip hand close to the cheek.
    let dominant = match config.dominant_hand {
        Handedness::Left => &left,
        Handedness::Right => &right,
    };
    if dominant.position.distance(sample.head.position) > config.aim_head_distance_trigger {
        return false;
    }

    if !grip_aligned(config, sample, signal, align_scale) {
        return false;
    }

    // The wearer has to be holding still laterally.
    signal.head_radial.x.abs() < config.movement_threshold
}

/// The alignment leg of the gate on its own: once aim has engaged, this
/// is the condition whose lapse releases it. An untracked hand reads as
/// not aligned.
pub fn grip_aligned(
    config: &CameraConfig,
    sample: &BodySample,
    signal: &KinematicSignal,
    align_scale: f32,
) -> bool {
    let (Some(left), Some(right), Some(average)) =
        (sample.left_hand, sample.right_hand, signal.hand_average)
    else {
        return false;
    };
    let Some(direction) = grip_direction_raw(config, &left, &right) else {
        return false;
    };
    let back = sample.head.transform_point(HEAD_BACK_OFFSET);
    let angle = cone_alignment_deg(
        back,
        average + direction * AIM_PROBE_REACH,
        sample.head.right(),
    );
    angle < config.aim_align_angle_trigger * align_scale
}

/// Unit vector from the dominant (rear) hand through the off (front)
/// hand. `None` when the hands coincide.
fn grip_direction_raw(config: &CameraConfig, left: &Pose, right: &Pose) -> Option<Vec3> {
    let (rear, front) = match config.dominant_hand {
        Handedness::Left => (left.position, right.position),
        Handedness::Right => (right.position, left.position),
    };
    let direction = (front - rear).normalize_or_zero();
    (direction != Vec3::ZERO).then_some(direction)
}

#[derive(Debug, Clone)]
pub struct AimFraming {
    /// Fallback when the grip degenerates for a tick.
    last_direction: Vec3,
}

impl AimFraming {
    pub fn new() -> Self {
        AimFraming {
            last_direction: Vec3::Z,
        }
    }

    /// Grip look direction with compact-grip vertical attenuation, or the
    /// last valid direction when the hands coincide or are untracked.
    pub fn look_direction(&mut self, config: &CameraConfig, sample: &BodySample) -> Vec3 {
        let (Some(left), Some(right)) = (sample.left_hand, sample.right_hand) else {
            return self.last_direction;
        };
        let Some(mut direction) = grip_direction_raw(config, &left, &right) else {
            return self.last_direction;
        };

        let separation = left.position.distance(right.position);
        let band = (config.aim_max_two_handed_distance - config.aim_min_two_handed_distance)
            .max(1e-4);
        let spread = ((separation - config.aim_min_two_handed_distance) / band).clamp(0.0, 1.0);
        direction.y *= spread;

        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return self.last_direction;
        }
        self.last_direction = direction;
        direction
    }

    fn eye_position(config: &CameraConfig, sample: &BodySample) -> Vec3 {
        let mut position = if config.use_eye_position {
            sample.eye(config.dominant_eye)
        } else {
            sample.head.position
        };
        // Headsets sit a little high relative to where people sight.
        position.y -= config.aim_eye_vertical_offset;
        position
    }
}

impl Default for AimFraming {
    fn default() -> Self {
        Self::new()
    }
}

impl FramingStrategy for AimFraming {
    fn evaluate(
        &mut self,
        config: &CameraConfig,
        sample: &BodySample,
        _signal: &KinematicSignal,
        _sides: &SideState,
        _dt: f32,
    ) -> FramingOutput {
        let position = Self::eye_position(config, sample);
        let direction = self.look_direction(config, sample);

        FramingOutput {
            position,
            look_at: position + direction * AIM_PROBE_REACH,
            fov: config.aim_fov,
            between_time: config.aim_smoothing,
            rotation: RotationPolicy::Blend {
                rotation: look_rotation(direction, Vec3::Y),
                weight: 1.0,
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::PoseSampler;
    use glam::Quat;

    /// A standing sample posed in a two-handed forward grip.
    fn aiming_sample() -> BodySample {
        let mut sample = BodySample::standing(1.7);
        let head = sample.head.position;
        sample.right_hand = Some(Pose::new(head + Vec3::new(0.02, -0.15, 0.2), Quat::IDENTITY));
        sample.left_hand = Some(Pose::new(head + Vec3::new(-0.02, -0.15, 0.6), Quat::IDENTITY));
        sample
    }

    fn settled_signal(config: &CameraConfig, sample: &BodySample) -> KinematicSignal {
        let mut sampler = PoseSampler::new(config);
        let mut signal = sampler.update(sample, 1.0 / 60.0);
        for _ in 0..120 {
            signal = sampler.update(sample, 1.0 / 60.0);
        }
        signal
    }

    #[test]
    fn gate_opens_for_forward_grip() {
        let config = CameraConfig::default();
        let sample = aiming_sample();
        let signal = settled_signal(&config, &sample);
        assert!(aim_gate(&config, &sample, &signal, config.aim_align_enter_scale));
    }

    #[test]
    fn gate_fails_without_a_hand() {
        let config = CameraConfig::default();
        let mut sample = aiming_sample();
        let signal = settled_signal(&config, &sample);
        sample.left_hand = None;
        assert!(!aim_gate(&config, &sample, &signal, config.aim_align_enter_scale));
    }

    #[test]
    fn gate_fails_outside_grip_band() {
        let config = CameraConfig::default();
        let mut sample = aiming_sample();
        // Spread the hands wider than a two-handed grip.
        let head = sample.head.position;
        sample.left_hand = Some(Pose::new(head + Vec3::new(0.0, -0.15, 1.2), Quat::IDENTITY));
        let signal = settled_signal(&config, &sample);
        assert!(!aim_gate(&config, &sample, &signal, config.aim_align_enter_scale));
    }

    #[test]
    fn gate_fails_with_lowered_hands() {
        let config = CameraConfig::default();
        let mut sample = aiming_sample();
        let head = sample.head.position;
        sample.right_hand = Some(Pose::new(head + Vec3::new(0.02, -1.0, 0.25), Quat::IDENTITY));
        let signal = settled_signal(&config, &sample);
        assert!(!aim_gate(&config, &sample, &signal, config.aim_align_enter_scale));
    }

    #[test]
    fn lowered_grip_stays_aligned_but_fails_the_gate() {
        let config = CameraConfig::default();
        let mut sample = aiming_sample();
        let head = sample.head.position;
        // Same grip direction, held at the waist.
        sample.right_hand = Some(Pose::new(head + Vec3::new(0.02, -1.15, 0.2), Quat::IDENTITY));
        sample.left_hand = Some(Pose::new(head + Vec3::new(-0.02, -1.15, 0.6), Quat::IDENTITY));
        let signal = settled_signal(&config, &sample);
        assert!(grip_aligned(
            &config,
            &sample,
            &signal,
            config.aim_align_hold_scale
        ));
        assert!(!aim_gate(&config, &sample, &signal, config.aim_align_enter_scale));
    }

    #[test]
    fn look_direction_follows_grip() {
        let config = CameraConfig::default();
        let sample = aiming_sample();
        let mut framing = AimFraming::new();
        let direction = framing.look_direction(&config, &sample);
        assert!(direction.dot(Vec3::Z) > 0.9);
    }

    #[test]
    fn coincident_hands_fall_back_to_last_direction() {
        let config = CameraConfig::default();
        let mut framing = AimFraming::new();
        let sample = aiming_sample();
        let first = framing.look_direction(&config, &sample);

        let mut degenerate = sample;
        degenerate.left_hand = degenerate.right_hand;
        let second = framing.look_direction(&config, &degenerate);
        assert_eq!(first, second);
        assert!(second.is_finite());
    }

    #[test]
    fn compact_grip_attenuates_vertical() {
        let config = CameraConfig::default();
        let mut sample = aiming_sample();
        let head = sample.head.position;
        // Nearly minimum separation with a vertical component.
        sample.right_hand = Some(Pose::new(head + Vec3::new(0.0, -0.2, 0.3), Quat::IDENTITY));
        sample.left_hand = Some(Pose::new(
            head + Vec3::new(0.0, -0.08, 0.42),
            Quat::IDENTITY,
        ));
        let mut framing = AimFraming::new();
        let direction = framing.look_direction(&config, &sample);
        // Raw grip pitches up ~45 degrees; attenuation flattens it.
        assert!(direction.y.abs() < 0.4);
    }
}
