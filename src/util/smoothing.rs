//! Per-frame exponential smoothing.
//!
//! Every animated value in the carousel moves toward its target by a fixed
//! fraction each frame: `value += (target - value) * factor`. After `n`
//! frames the remaining error is `initial * (1 - factor)^n`.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

/// One smoothing step of a scalar toward `target`.
#[inline]
#[must_use]
pub fn approach(value: f32, target: f32, factor: f32) -> f32 {
    value + (target - value) * factor
}

/// One smoothing step of a vector toward `target` (component-wise).
#[inline]
#[must_use]
pub fn approach_vec3(value: Vec3, target: Vec3, factor: f32) -> Vec3 {
    value.lerp(target, factor)
}

/// Wrap an angle into `[0, 2π)`.
#[inline]
#[must_use]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// One smoothing step of an angle toward `target` along the shorter arc.
/// The result is wrapped into `[0, 2π)`.
#[inline]
#[must_use]
pub fn approach_angle(value: f32, target: f32, factor: f32) -> f32 {
    let delta = (target - value + PI).rem_euclid(TAU) - PI;
    wrap_angle(value + delta * factor)
}

/// Number of frames until `initial_error` decays below `epsilon`.
///
/// Returns 0 when the error is already within `epsilon`, and `None` when
/// `factor` is outside `(0, 1]` and the value would never converge.
#[must_use]
pub fn frames_to_settle(
    initial_error: f32,
    epsilon: f32,
    factor: f32,
) -> Option<u32> {
    let error = initial_error.abs();
    if error <= epsilon {
        return Some(0);
    }
    if !(factor > 0.0 && factor <= 1.0) || epsilon <= 0.0 {
        return None;
    }
    if factor == 1.0 {
        return Some(1);
    }
    let frames = ((epsilon / error).ln() / (1.0 - factor).ln()).ceil();
    Some(frames as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approach_moves_by_factor() {
        assert_eq!(approach(0.0, 10.0, 0.1), 1.0);
        assert_eq!(approach(10.0, 10.0, 0.1), 10.0);
        assert_eq!(approach(4.0, 0.0, 0.5), 2.0);
    }

    #[test]
    fn approach_decays_geometrically() {
        let mut value = 0.0_f32;
        let target = 1.0_f32;
        for _ in 0..20 {
            value = approach(value, target, 0.05);
        }
        let expected = 0.95_f32.powi(20);
        assert!(((target - value) - expected).abs() < 1e-5);
    }

    #[test]
    fn vec3_approach_is_componentwise() {
        let v = approach_vec3(Vec3::ONE, Vec3::splat(1.2), 0.1);
        assert!((v - Vec3::splat(1.02)).length() < 1e-6);
    }

    #[test]
    fn wrap_angle_range() {
        assert_eq!(wrap_angle(0.0), 0.0);
        assert!((wrap_angle(TAU + 0.5) - 0.5).abs() < 1e-5);
        assert!((wrap_angle(-0.5) - (TAU - 0.5)).abs() < 1e-5);
        assert!(wrap_angle(-1e-9) < TAU);
    }

    #[test]
    fn angle_approach_takes_the_shorter_arc() {
        // 0.1 -> 6.2 is shorter backwards through zero.
        let step = approach_angle(0.1, 6.2, 0.5);
        assert!(step > 6.0 && step < TAU);
        // Negative targets are the same direction as their wrapped form.
        let mut value = 0.5_f32;
        for _ in 0..200 {
            value = approach_angle(value, -1.0, 0.1);
        }
        assert!((value - wrap_angle(-1.0)).abs() < 1e-4);
    }

    #[test]
    fn settle_frame_count_matches_simulation() {
        let frames = frames_to_settle(1.0, 1e-3, 0.05).unwrap();
        let mut value = 0.0_f32;
        for _ in 0..frames {
            value = approach(value, 1.0, 0.05);
        }
        assert!((1.0 - value).abs() <= 1e-3);
        assert_eq!(frames_to_settle(0.0, 1e-3, 0.05), Some(0));
        assert_eq!(frames_to_settle(1.0, 1e-3, 0.0), None);
        assert_eq!(frames_to_settle(1.0, 1e-3, 1.0), Some(1));
    }
}
