//! Linear range mapping between the integral pixel plane and other
//! ranges.  One variant maps a pixel index onto a real interval (used
//! to turn a canvas coordinate into a point on the complex plane),
//! the other maps an integer onto an integer interval with the result
//! floored (used to turn an iteration count into a 0-255 intensity).
//!
//! Both variants are endpoint-exact: `orig_start` maps to `new_start`
//! and `orig_end` maps to `new_end`.  Callers guarantee
//! `orig_end > orig_start`; the canvas dimensions are validated to be
//! at least 2 for exactly this reason.

/// Maps `orig_value` from the integer range `orig_start..=orig_end`
/// onto the real range `new_start..=new_end`.
pub fn int_range_to_float_range(
    orig_value: usize,
    orig_start: usize,
    orig_end: usize,
    new_start: f64,
    new_end: f64,
) -> f64 {
    (orig_value as f64 - orig_start as f64) / (orig_end as f64 - orig_start as f64)
        * (new_end - new_start)
        + new_start
}

/// Maps `orig_value` from the integer range `orig_start..=orig_end`
/// onto the integer range `new_start..=new_end`, flooring the
/// interpolated value rather than rounding it.
pub fn int_range_to_int_range(
    orig_value: usize,
    orig_start: usize,
    orig_end: usize,
    new_start: usize,
    new_end: usize,
) -> usize {
    (int_range_to_float_range(orig_value, orig_start, orig_end, new_start as f64, new_end as f64))
        .floor() as usize
}
