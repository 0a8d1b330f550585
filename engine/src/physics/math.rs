//! Scalar helpers shared by the motion and collision cores.

use std::ops::{Add, Mul, Sub};

/// Tolerance for "numerically zero" comparisons (loop fade-out completion).
pub const NEARLY_ZERO: f32 = 1e-8;

/// Returns true if `value` is within [`NEARLY_ZERO`] of zero.
#[inline]
pub fn is_nearly_zero(value: f32) -> bool {
    value.abs() <= NEARLY_ZERO
}

/// Maps `value` from the range `[in_a, in_b]` onto `[out_a, out_b]`.
///
/// The normalized position is clamped to `[0, 1]` before remapping, so the
/// result never leaves the output range. An inverted input range still
/// clamps (the output is then inverted too) rather than failing. A
/// degenerate input range (`in_a == in_b`) maps to `out_b` when
/// `value >= in_b` and to `out_a` otherwise.
pub fn map_range_clamped(value: f32, in_a: f32, in_b: f32, out_a: f32, out_b: f32) -> f32 {
    let span = in_b - in_a;
    let pct = if span != 0.0 {
        (value - in_a) / span
    } else if value >= in_b {
        1.0
    } else {
        0.0
    };
    let pct = pct.clamp(0.0, 1.0);
    out_a + (out_b - out_a) * pct
}

/// One step of exponential interpolation from `current` toward `target`.
///
/// Computes `current + (target - current) * alpha` with
/// `alpha = delta_time * speed` clamped to `[0, 1]`, so the result always
/// lies between `current` and `target`.
#[inline]
pub fn interp_step<T>(current: T, target: T, delta_time: f32, speed: f32) -> T
where
    T: Copy + Add<Output = T> + Sub<Output = T> + Mul<f32, Output = T>,
{
    let alpha = (delta_time * speed).clamp(0.0, 1.0);
    current + (target - current) * alpha
}
