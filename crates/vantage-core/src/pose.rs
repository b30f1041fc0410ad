//! Pose primitives and the per-tick tracked body sample
//!
//! A `Pose` is an immutable value, recomputed every tick; nothing here is
//! persisted. `BodySample` is the read-only snapshot handed in by the
//! external pose provider — hands may legitimately be untracked for a
//! tick, which downstream gating treats as "condition not met".

use glam::{Quat, Vec3};

/// Position + orientation in 3D space. Forward is the local +Z axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub const IDENTITY: Pose = Pose {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Pose { position, rotation }
    }

    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    #[inline]
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Local point -> world space.
    #[inline]
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * local
    }

    /// World point -> this pose's local frame.
    #[inline]
    pub fn inverse_transform_point(&self, world: Vec3) -> Vec3 {
        self.rotation.conjugate() * (world - self.position)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Pose::IDENTITY
    }
}

/// Which hand (or eye) is dominant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
}

/// Read-only tracked body snapshot for one tick.
///
/// Owned by the external pose provider; the engine only reads it.
#[derive(Debug, Clone, Copy)]
pub struct BodySample {
    pub head: Pose,
    pub waist: Pose,
    /// Untracked hands are `None` for the tick.
    pub left_hand: Option<Pose>,
    pub right_hand: Option<Pose>,
    pub left_eye: Vec3,
    pub right_eye: Vec3,
}

impl BodySample {
    /// A neutral standing sample at the given head height, useful as a
    /// starting point in tests and simulators.
    pub fn standing(head_height: f32) -> Self {
        let head = Pose::new(Vec3::new(0.0, head_height, 0.0), Quat::IDENTITY);
        let waist = Pose::new(Vec3::new(0.0, head_height * 0.55, 0.0), Quat::IDENTITY);
        let eye_offset = Vec3::new(0.032, -0.05, 0.05);
        BodySample {
            head,
            waist,
            left_hand: Some(Pose::new(
                Vec3::new(-0.25, head_height * 0.5, 0.2),
                Quat::IDENTITY,
            )),
            right_hand: Some(Pose::new(
                Vec3::new(0.25, head_height * 0.5, 0.2),
                Quat::IDENTITY,
            )),
            left_eye: head.transform_point(Vec3::new(-eye_offset.x, eye_offset.y, eye_offset.z)),
            right_eye: head.transform_point(eye_offset),
        }
    }

    /// Midpoint of both hands, when both are tracked.
    pub fn hand_average(&self) -> Option<Vec3> {
        match (&self.left_hand, &self.right_hand) {
            (Some(l), Some(r)) => Some((l.position + r.position) * 0.5),
            _ => None,
        }
    }

    /// Distance between the hands, when both are tracked.
    pub fn hand_separation(&self) -> Option<f32> {
        match (&self.left_hand, &self.right_hand) {
            (Some(l), Some(r)) => Some(l.position.distance(r.position)),
            _ => None,
        }
    }

    pub fn eye(&self, side: Handedness) -> Vec3 {
        match side {
            Handedness::Left => self.left_eye,
            Handedness::Right => self.right_eye,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_round_trip() {
        let pose = Pose::new(
            Vec3::new(1.0, 2.0, 3.0),
            Quat::from_rotation_y(0.7),
        );
        let local = Vec3::new(0.2, -0.5, 1.0);
        let back = pose.inverse_transform_point(pose.transform_point(local));
        assert!(back.distance(local) < 1e-5);
    }

    #[test]
    fn hand_average_requires_both_hands() {
        let mut sample = BodySample::standing(1.7);
        assert!(sample.hand_average().is_some());
        sample.left_hand = None;
        assert!(sample.hand_average().is_none());
        assert!(sample.hand_separation().is_none());
    }
}
