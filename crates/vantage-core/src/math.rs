//! Geometry helpers for camera placement and smoothing
//!
//! The smoothing primitive is a critically damped spring approximation
//! (`smooth_damp`), applied independently to the camera position, the
//! look-at target and the sampler's damped reference points. The proxy
//! "cone alignment" helpers intentionally keep the original tuning
//! arithmetic: an absolute cosine scaled to degrees is a small-angle
//! approximation, and the shipped thresholds were tuned against it.

use glam::{Mat3, Quat, Vec3};

/// Degrees per unit of the |cos| alignment proxy.
pub const ALIGN_DEG_PER_UNIT: f32 = 57.295_78;

/// Critically damped smoothing of a scalar toward a target.
///
/// `velocity` carries state between ticks. `smooth_time` is roughly the
/// time to cover most of the remaining distance; it is floored to avoid
/// division blowups on degenerate configs.
pub fn smooth_damp(current: f32, target: f32, velocity: &mut f32, smooth_time: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        return current;
    }
    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);
    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    let mut output = target + (change + temp) * exp;
    // Do not overshoot the target.
    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = 0.0;
    }
    output
}

/// Critically damped smoothing of a point toward a target.
pub fn smooth_damp_vec3(
    current: Vec3,
    target: Vec3,
    velocity: &mut Vec3,
    smooth_time: f32,
    dt: f32,
) -> Vec3 {
    if dt <= 0.0 {
        return current;
    }
    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);
    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    let output = target + (change + temp) * exp;
    // Do not overshoot the target.
    if (target - current).dot(output - target) > 0.0 {
        *velocity = Vec3::ZERO;
        return target;
    }
    output
}

/// Project `offset` (a pivot-relative vector) onto a horizontal circle of
/// the given radius. The vertical component is zeroed; callers keep their
/// own vertical damping.
///
/// A vector with no horizontal extent cannot be re-projected; it is
/// returned unchanged so the caller falls back to plain smoothing.
pub fn clamp_to_circle(offset: Vec3, radius: f32) -> Vec3 {
    let planar = Vec3::new(offset.x, 0.0, offset.z);
    let len = planar.length();
    if len < 1e-5 {
        return offset;
    }
    planar * (radius / len)
}

/// Alignment of the direction `source -> target` with `axis`, as an
/// absolute cosine in [0, 1]. Coincident points align with nothing.
pub fn cone_alignment(source: Vec3, target: Vec3, axis: Vec3) -> f32 {
    let direction = (target - source).normalize_or_zero();
    if direction == Vec3::ZERO {
        return 0.0;
    }
    direction.dot(axis).abs()
}

/// `cone_alignment` scaled to degrees (small-angle proxy).
pub fn cone_alignment_deg(source: Vec3, target: Vec3, axis: Vec3) -> f32 {
    cone_alignment(source, target, axis) * ALIGN_DEG_PER_UNIT
}

/// Average alignment of both hand forward axes with the direction toward
/// `target`, in proxy degrees. The left forward axis is negated so that a
/// mirrored grip reads the same as the right hand.
pub fn average_hand_alignment_deg(
    right_pos: Vec3,
    right_forward: Vec3,
    left_pos: Vec3,
    left_forward: Vec3,
    target: Vec3,
) -> f32 {
    let right = cone_alignment(right_pos, target, right_forward);
    let left = cone_alignment(left_pos, target, -left_forward);
    (right + left) * 0.5 * ALIGN_DEG_PER_UNIT
}

/// Orientation whose forward (+Z) axis points along `forward`.
///
/// Falls back to a minimal arc when `forward` is parallel to `up`, and to
/// identity when `forward` is degenerate.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let f = forward.normalize_or_zero();
    if f == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    let r = up.cross(f).normalize_or_zero();
    if r == Vec3::ZERO {
        return Quat::from_rotation_arc(Vec3::Z, f);
    }
    let u = f.cross(r);
    Quat::from_mat3(&Mat3::from_cols(r, u, f)).normalize()
}

/// Horizontal (XZ-plane) distance between two points.
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    let d = a - b;
    Vec3::new(d.x, 0.0, d.z).length()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smooth_damp_converges() {
        let mut v = 0.0;
        let mut x = 0.0;
        for _ in 0..600 {
            x = smooth_damp(x, 10.0, &mut v, 0.3, 1.0 / 60.0);
        }
        assert!((x - 10.0).abs() < 0.01);
    }

    #[test]
    fn smooth_damp_does_not_overshoot() {
        let mut v = 0.0;
        let mut x = 0.0;
        for _ in 0..600 {
            x = smooth_damp(x, 1.0, &mut v, 0.05, 1.0 / 60.0);
            assert!(x <= 1.0 + 1e-5);
        }
    }

    #[test]
    fn smooth_damp_vec3_bounded_step() {
        let mut v = Vec3::ZERO;
        let mut p = Vec3::ZERO;
        let target = Vec3::new(3.0, 1.0, -2.0);
        let mut last = p;
        for _ in 0..200 {
            p = smooth_damp_vec3(p, target, &mut v, 0.5, 1.0 / 60.0);
            // One tick never covers more than the remaining distance.
            assert!(p.distance(last) <= last.distance(target) + 1e-5);
            last = p;
        }
        assert!(p.distance(target) < 0.05);
    }

    #[test]
    fn circle_clamp_holds_radius() {
        let clamped = clamp_to_circle(Vec3::new(0.3, 1.2, 0.4), 2.0);
        assert!((Vec3::new(clamped.x, 0.0, clamped.z).length() - 2.0).abs() < 1e-5);
        assert_eq!(clamped.y, 0.0);
    }

    #[test]
    fn circle_clamp_degenerate_passthrough() {
        let vertical = Vec3::new(0.0, 3.0, 0.0);
        assert_eq!(clamp_to_circle(vertical, 2.0), vertical);
    }

    #[test]
    fn cone_alignment_degenerate_is_zero() {
        let p = Vec3::new(1.0, 1.0, 1.0);
        assert_eq!(cone_alignment(p, p, Vec3::Z), 0.0);
    }

    #[test]
    fn look_rotation_faces_target() {
        let q = look_rotation(Vec3::new(1.0, 0.0, 1.0), Vec3::Y);
        let fwd = q * Vec3::Z;
        assert!(fwd.dot(Vec3::new(1.0, 0.0, 1.0).normalize()) > 0.999);
    }

    #[test]
    fn look_rotation_degenerate_is_identity() {
        assert_eq!(look_rotation(Vec3::ZERO, Vec3::Y), Quat::IDENTITY);
    }
}
