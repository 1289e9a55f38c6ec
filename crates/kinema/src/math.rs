//! Interpolation and remapping helpers for sketch code.
//!
//! The float shims at the bottom route to `std` or `libm` depending on the
//! enabled feature.
//!
//! ```rust
//! use kinema::math::{lerp_angle_deg, map_clamped};
//!
//! // pointer distance to an influence factor
//! assert_eq!(map_clamped(450.0, 0.0, 300.0, 0.0, 1.0), 1.0);
//!
//! // 350° to 10° goes forward through 0°, not back through 180°
//! assert_eq!(lerp_angle_deg(350.0, 10.0, 0.5), 360.0);
//! ```

use core::f64::consts::PI;

use crate::spring::wrap_signed;

/// Linear interpolation; `t` outside `[0, 1]` extrapolates.
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Where `value` sits between `from` and `to`, as a fraction.
///
/// Returns 0 when the range is empty.
#[inline]
pub fn inverse_lerp(from: f64, to: f64, value: f64) -> f64 {
    let span = to - from;
    if span == 0.0 { 0.0 } else { (value - from) / span }
}

/// Restricts `value` to the range spanned by `a` and `b`, in either order.
///
/// Unlike [`f64::clamp`] this never panics; a NaN `value` stays NaN.
#[inline]
pub fn clamp(value: f64, a: f64, b: f64) -> f64 {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    if value < low {
        low
    } else if value > high {
        high
    } else {
        value
    }
}

/// Remaps `value` from `[in_min, in_max]` to `[out_min, out_max]`.
///
/// Values outside the input range extrapolate. An empty input range maps
/// everything to `out_min`.
#[inline]
pub fn map(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    lerp(out_min, out_max, inverse_lerp(in_min, in_max, value))
}

/// Like [`map`], but the result never leaves `[out_min, out_max]`.
#[inline]
pub fn map_clamped(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    lerp(out_min, out_max, clamp(inverse_lerp(in_min, in_max, value), 0.0, 1.0))
}

/// Degrees to radians.
#[inline]
pub fn to_radian(degrees: f64) -> f64 {
    degrees * (PI / 180.0)
}

/// Radians to degrees.
#[inline]
pub fn to_degree(radians: f64) -> f64 {
    radians * (180.0 / PI)
}

/// Interpolates between two angles in degrees along the shorter arc.
///
/// The result is `from` plus a fraction of the signed shortest difference,
/// so it is not normalised: `lerp_angle_deg(350.0, 10.0, 1.0)` is `370.0`.
#[inline]
pub fn lerp_angle_deg(from: f64, to: f64, t: f64) -> f64 {
    from + wrap_signed(to - from, 360.0) * t
}

/// Interpolates between two angles in radians along the shorter arc.
#[inline]
pub fn lerp_angle(from: f64, to: f64, t: f64) -> f64 {
    from + wrap_signed(to - from, 2.0 * PI) * t
}

#[cfg(feature = "std")]
#[inline]
pub(crate) fn exp(x: f64) -> f64 {
    x.exp()
}

#[cfg(not(feature = "std"))]
#[inline]
pub(crate) fn exp(x: f64) -> f64 {
    libm::exp(x)
}

#[cfg(feature = "std")]
#[inline]
pub(crate) fn sin(x: f64) -> f64 {
    x.sin()
}

#[cfg(not(feature = "std"))]
#[inline]
pub(crate) fn sin(x: f64) -> f64 {
    libm::sin(x)
}

#[cfg(feature = "std")]
#[inline]
pub(crate) fn cos(x: f64) -> f64 {
    x.cos()
}

#[cfg(not(feature = "std"))]
#[inline]
pub(crate) fn cos(x: f64) -> f64 {
    libm::cos(x)
}

#[cfg(feature = "std")]
#[inline]
pub(crate) fn ceil(x: f64) -> f64 {
    x.ceil()
}

#[cfg(not(feature = "std"))]
#[inline]
pub(crate) fn ceil(x: f64) -> f64 {
    libm::ceil(x)
}

#[cfg(feature = "std")]
#[inline]
pub(crate) fn sqrt(x: f64) -> f64 {
    x.sqrt()
}

#[cfg(not(feature = "std"))]
#[inline]
pub(crate) fn sqrt(x: f64) -> f64 {
    libm::sqrt(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.0), 0.0);
        assert_eq!(lerp(0.0, 10.0, 0.25), 2.5);
        assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
        assert_eq!(lerp(10.0, 0.0, 1.5), -5.0);
    }

    #[test]
    fn test_clamp_accepts_reversed_bounds() {
        assert_eq!(clamp(5.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-5.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp(0.5, 1.0, 0.0), 0.5);
        assert_eq!(clamp(2.0, 1.0, 0.0), 1.0);
        assert!(clamp(f64::NAN, 0.0, 1.0).is_nan());
    }

    #[test]
    fn test_map() {
        assert_eq!(map(5.0, 0.0, 10.0, 100.0, 200.0), 150.0);
        assert_eq!(map(20.0, 0.0, 10.0, 0.0, 1.0), 2.0);
        assert_eq!(map(3.0, 3.0, 3.0, 7.0, 9.0), 7.0);
    }

    #[test]
    fn test_map_clamped() {
        assert_eq!(map_clamped(20.0, 0.0, 10.0, 0.0, 1.0), 1.0);
        assert_eq!(map_clamped(-1.0, 0.0, 10.0, 0.0, 1.0), 0.0);
        // fade out: alpha goes 1 -> 0 over the zoom duration
        assert_eq!(map_clamped(0.25, 0.0, 0.5, 1.0, 0.0), 0.5);
        assert_eq!(map_clamped(9.0, 0.0, 0.5, 1.0, 0.0), 0.0);
    }

    #[test]
    fn test_angle_conversions() {
        assert!((to_radian(180.0) - PI).abs() < TOLERANCE);
        assert!((to_degree(PI / 2.0) - 90.0).abs() < TOLERANCE);
        assert!((to_degree(to_radian(37.5)) - 37.5).abs() < TOLERANCE);
    }

    #[test]
    fn test_lerp_angle_deg_takes_short_arc() {
        // 350 -> 10 crosses 0, a 20 degree move
        assert_eq!(lerp_angle_deg(350.0, 10.0, 0.5), 360.0);
        assert_eq!(lerp_angle_deg(350.0, 10.0, 1.0), 370.0);
        assert_eq!(lerp_angle_deg(10.0, 350.0, 0.5), 0.0);
        assert_eq!(lerp_angle_deg(0.0, 90.0, 0.5), 45.0);
        assert_eq!(lerp_angle_deg(-170.0, 170.0, 0.5), -180.0);
    }

    #[test]
    fn test_lerp_angle_radians() {
        let from = to_radian(350.0);
        let to = to_radian(10.0);
        let mid = lerp_angle(from, to, 0.5);
        assert!((mid - to_radian(360.0)).abs() < 1e-9);
    }
}
