//! Camera configuration
//!
//! Every tunable of the placement engine lives here. The struct is
//! replaced wholesale on hot-reload; strategies read it by reference and
//! recompute their trigonometric offsets on demand, so a reload takes
//! effect on the next tick. Range validation happens once at the loading
//! boundary (`validate` / `clamped`), never on the per-tick path.

use glam::Vec3;

use crate::error::{VantageError, VantageResult};
use crate::pose::Handedness;

/// All placement, selection and smoothing parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    /// Minimum seconds between automatic framing-mode changes.
    pub swap_time_lock: f32,
    /// Seconds between gesture evaluations (gesture throttle).
    pub gesture_interval: f32,

    /// Lateral radial-delta magnitude that counts as deliberate movement.
    pub movement_threshold: f32,
    /// Vertical radial-delta magnitude that counts as deliberate movement.
    pub vertical_movement_threshold: f32,

    /// Sampler probe offsets (meters) used to build direction points.
    pub forward_horizontal_offset: f32,
    pub forward_vertical_offset: f32,
    pub forward_distance: f32,

    /// Hide the whole avatar instead of just the head for in-avatar modes.
    pub remove_avatar_instead_of_head: bool,
    /// Pin the Simple framing look-at height to a chest estimate.
    pub vertical_lock: bool,
    /// Substitute the neutral framing while a side swap is in flight.
    pub between_camera_enabled: bool,

    pub disable_top_camera: bool,
    pub disable_body_camera: bool,
    pub disable_first_person: bool,
    pub disable_aim_camera: bool,
    /// Allow the aim gate to preempt the global swap lock.
    pub aim_override: bool,

    pub default_fov: f32,
    /// Smooth FOV changes instead of snapping them.
    pub fov_lerp: bool,

    // Over-the-shoulder framing
    pub shoulder_distance: f32,
    pub shoulder_angle_deg: f32,
    pub shoulder_positioning_time: f32,
    pub shoulder_sensitivity: f32,
    pub reverse_shoulder: bool,
    pub shoulder_follow_gaze: bool,
    pub shoulder_use_room_origin: bool,

    // Full-body framing
    pub body_distance: f32,
    pub body_angle_deg: f32,
    pub body_positioning_time: f32,
    pub body_sensitivity: f32,
    pub body_vertical_target_offset: f32,
    pub body_look_at_forward: f32,
    pub reverse_body: bool,
    pub body_follow_gaze: bool,
    pub body_use_room_origin: bool,
    /// Anchor framing height on the waist rather than the head.
    pub use_waist_height: bool,

    // First-person framing
    pub first_person_positioning_time: f32,
    pub use_eye_position: bool,
    pub dominant_eye: Handedness,
    pub dominant_hand: Handedness,

    // Aim (down-sights) framing and its gate
    pub aim_fov: f32,
    pub aim_smoothing: f32,
    pub aim_align_angle_trigger: f32,
    /// Enter/hold scales applied to the alignment trigger angle. These
    /// were observed as distinct multipliers at different call sites and
    /// are deliberately tunable.
    pub aim_align_enter_scale: f32,
    pub aim_align_hold_scale: f32,
    pub aim_align_blend_scale: f32,
    pub aim_head_distance_trigger: f32,
    pub aim_eye_vertical_offset: f32,
    pub aim_min_two_handed_distance: f32,
    pub aim_max_two_handed_distance: f32,
    /// How far below the head reference a hand may sit and still count as
    /// raised for the aim gate.
    pub aim_hand_height_drop: f32,

    // Top-down framing
    pub top_down_height: f32,
    pub top_down_positioning_time: f32,
    /// Draw threshold in 0..100; a draw above it picks top-down over
    /// full-body on the upward gesture. Higher = rarer top-down.
    pub top_down_weight: u8,

    // Gesture alignment gates (proxy degrees, see math::cone_alignment_deg)
    pub down_gesture_alignment: f32,
    pub up_gesture_alignment: f32,
    pub lateral_gesture_alignment: f32,

    /// Planar camera-to-head clearance enforced after smoothing.
    pub minimum_camera_distance: f32,
    /// Disable the constant-radius arc during side swaps.
    pub linear_camera_movement: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        CameraConfig {
            swap_time_lock: 8.0,
            gesture_interval: 1.0,

            movement_threshold: 2.0,
            vertical_movement_threshold: 2.0,

            forward_horizontal_offset: 5.0,
            forward_vertical_offset: 0.0,
            forward_distance: 10.0,

            remove_avatar_instead_of_head: true,
            vertical_lock: true,
            between_camera_enabled: true,

            disable_top_camera: true,
            disable_body_camera: false,
            disable_first_person: false,
            disable_aim_camera: false,
            aim_override: false,

            default_fov: 80.0,
            fov_lerp: false,

            shoulder_distance: 1.8,
            shoulder_angle_deg: 20.0,
            shoulder_positioning_time: 2.0,
            shoulder_sensitivity: 2.0,
            reverse_shoulder: false,
            shoulder_follow_gaze: true,
            shoulder_use_room_origin: false,

            body_distance: 1.4,
            body_angle_deg: 55.0,
            body_positioning_time: 2.0,
            body_sensitivity: 2.0,
            body_vertical_target_offset: 0.5,
            body_look_at_forward: 0.1,
            reverse_body: false,
            body_follow_gaze: true,
            body_use_room_origin: false,
            use_waist_height: false,

            first_person_positioning_time: 0.2,
            use_eye_position: true,
            dominant_eye: Handedness::Right,
            dominant_hand: Handedness::Right,

            aim_fov: 80.0,
            aim_smoothing: 0.2,
            aim_align_angle_trigger: 15.0,
            aim_align_enter_scale: 1.4,
            aim_align_hold_scale: 1.2,
            aim_align_blend_scale: 0.9,
            aim_head_distance_trigger: 0.3,
            aim_eye_vertical_offset: 0.15,
            aim_min_two_handed_distance: 0.15,
            aim_max_two_handed_distance: 0.6,
            aim_hand_height_drop: 0.55,

            top_down_height: 6.0,
            top_down_positioning_time: 0.6,
            top_down_weight: 80,

            down_gesture_alignment: 45.0,
            up_gesture_alignment: 45.0,
            lateral_gesture_alignment: 80.0,

            minimum_camera_distance: 0.5,
            linear_camera_movement: false,
        }
    }
}

/// (field, value, min, max) triples for every range-checked float.
macro_rules! ranges {
    ($cfg:expr) => {
        [
            ("swap_time_lock", $cfg.swap_time_lock, 0.1, 30.0),
            ("gesture_interval", $cfg.gesture_interval, 0.1, 5.0),
            ("movement_threshold", $cfg.movement_threshold, 0.1, 5.0),
            (
                "vertical_movement_threshold",
                $cfg.vertical_movement_threshold,
                0.1,
                5.0,
            ),
            ("default_fov", $cfg.default_fov, 45.0, 120.0),
            ("shoulder_distance", $cfg.shoulder_distance, 0.1, 10.0),
            ("shoulder_angle_deg", $cfg.shoulder_angle_deg, 0.0, 75.0),
            (
                "shoulder_positioning_time",
                $cfg.shoulder_positioning_time,
                0.1,
                10.0,
            ),
            ("shoulder_sensitivity", $cfg.shoulder_sensitivity, 0.1, 10.0),
            ("body_distance", $cfg.body_distance, 0.5, 5.0),
            ("body_angle_deg", $cfg.body_angle_deg, 0.0, 75.0),
            ("body_positioning_time", $cfg.body_positioning_time, 0.1, 10.0),
            ("body_sensitivity", $cfg.body_sensitivity, 0.1, 10.0),
            (
                "body_vertical_target_offset",
                $cfg.body_vertical_target_offset,
                0.0,
                2.0,
            ),
            ("body_look_at_forward", $cfg.body_look_at_forward, 0.0, 10.0),
            (
                "first_person_positioning_time",
                $cfg.first_person_positioning_time,
                0.05,
                10.0,
            ),
            ("aim_fov", $cfg.aim_fov, 45.0, 120.0),
            ("aim_smoothing", $cfg.aim_smoothing, 0.0, 1.0),
            ("aim_align_angle_trigger", $cfg.aim_align_angle_trigger, 0.0, 75.0),
            ("aim_align_enter_scale", $cfg.aim_align_enter_scale, 0.1, 3.0),
            ("aim_align_hold_scale", $cfg.aim_align_hold_scale, 0.1, 3.0),
            ("aim_align_blend_scale", $cfg.aim_align_blend_scale, 0.1, 3.0),
            (
                "aim_head_distance_trigger",
                $cfg.aim_head_distance_trigger,
                0.0,
                1.0,
            ),
            ("aim_eye_vertical_offset", $cfg.aim_eye_vertical_offset, 0.0, 1.0),
            (
                "aim_min_two_handed_distance",
                $cfg.aim_min_two_handed_distance,
                0.0,
                1.0,
            ),
            (
                "aim_max_two_handed_distance",
                $cfg.aim_max_two_handed_distance,
                0.0,
                2.0,
            ),
            ("aim_hand_height_drop", $cfg.aim_hand_height_drop, 0.0, 2.0),
            ("top_down_height", $cfg.top_down_height, 1.0, 20.0),
            (
                "top_down_positioning_time",
                $cfg.top_down_positioning_time,
                0.1,
                10.0,
            ),
            ("down_gesture_alignment", $cfg.down_gesture_alignment, 0.0, 90.0),
            ("up_gesture_alignment", $cfg.up_gesture_alignment, 0.0, 90.0),
            (
                "lateral_gesture_alignment",
                $cfg.lateral_gesture_alignment,
                0.0,
                90.0,
            ),
            (
                "minimum_camera_distance",
                $cfg.minimum_camera_distance,
                0.0,
                2.0,
            ),
        ]
    };
}

impl CameraConfig {
    /// Report the first out-of-range value, if any.
    pub fn validate(&self) -> VantageResult<()> {
        for (field, value, min, max) in ranges!(self) {
            if !(min..=max).contains(&value) || !value.is_finite() {
                return Err(VantageError::ConfigOutOfRange {
                    field,
                    value,
                    min,
                    max,
                });
            }
        }
        if self.aim_min_two_handed_distance > self.aim_max_two_handed_distance {
            return Err(VantageError::ConfigOutOfRange {
                field: "aim_min_two_handed_distance",
                value: self.aim_min_two_handed_distance,
                min: 0.0,
                max: self.aim_max_two_handed_distance,
            });
        }
        Ok(())
    }

    /// Clamp every range-checked value into its safe band. This is the
    /// loading-boundary sanitizer; the engine assumes it already ran.
    pub fn clamped(mut self) -> Self {
        macro_rules! clamp_field {
            ($($field:ident: $min:expr, $max:expr;)*) => {
                $(
                    self.$field = if self.$field.is_finite() {
                        self.$field.clamp($min, $max)
                    } else {
                        CameraConfig::default().$field
                    };
                )*
            };
        }
        clamp_field! {
            swap_time_lock: 0.1, 30.0;
            gesture_interval: 0.1, 5.0;
            movement_threshold: 0.1, 5.0;
            vertical_movement_threshold: 0.1, 5.0;
            default_fov: 45.0, 120.0;
            shoulder_distance: 0.1, 10.0;
            shoulder_angle_deg: 0.0, 75.0;
            shoulder_positioning_time: 0.1, 10.0;
            shoulder_sensitivity: 0.1, 10.0;
            body_distance: 0.5, 5.0;
            body_angle_deg: 0.0, 75.0;
            body_positioning_time: 0.1, 10.0;
            body_sensitivity: 0.1, 10.0;
            body_vertical_target_offset: 0.0, 2.0;
            body_look_at_forward: 0.0, 10.0;
            first_person_positioning_time: 0.05, 10.0;
            aim_fov: 45.0, 120.0;
            aim_smoothing: 0.0, 1.0;
            aim_align_angle_trigger: 0.0, 75.0;
            aim_align_enter_scale: 0.1, 3.0;
            aim_align_hold_scale: 0.1, 3.0;
            aim_align_blend_scale: 0.1, 3.0;
            aim_head_distance_trigger: 0.0, 1.0;
            aim_eye_vertical_offset: 0.0, 1.0;
            aim_min_two_handed_distance: 0.0, 1.0;
            aim_max_two_handed_distance: 0.0, 2.0;
            aim_hand_height_drop: 0.0, 2.0;
            top_down_height: 1.0, 20.0;
            top_down_positioning_time: 0.1, 10.0;
            down_gesture_alignment: 0.0, 90.0;
            up_gesture_alignment: 0.0, 90.0;
            lateral_gesture_alignment: 0.0, 90.0;
            minimum_camera_distance: 0.0, 2.0;
        }
        if self.aim_min_two_handed_distance > self.aim_max_two_handed_distance {
            self.aim_min_two_handed_distance = self.aim_max_two_handed_distance;
        }
        self
    }

    /// Head-relative shoulder placement derived from distance and angle.
    /// Positive X; the active side mirrors it at evaluation time.
    pub fn shoulder_offset(&self) -> Vec3 {
        let angle = self.shoulder_angle_deg.to_radians();
        Vec3::new(
            self.shoulder_distance * angle.sin(),
            0.0,
            -self.shoulder_distance * angle.cos(),
        )
    }

    /// Head-relative full-body placement derived from distance and angle.
    pub fn body_offset(&self) -> Vec3 {
        let angle = self.body_angle_deg.to_radians();
        Vec3::new(
            self.body_distance * angle.sin(),
            0.0,
            -self.body_distance * angle.cos(),
        )
    }
}
