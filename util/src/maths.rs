//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Clamp `value` into `[min, max]`.
pub fn clamp<T>(value: T, min: T, max: T) -> T 
where
    T: Float
{
    let mut ret = value;

    if ret > max {
        ret = max
    }
    if ret < min {
        ret = min
    }

    ret
}

/// Linearly interpolate between `a` and `b` by the fraction `t`.
///
/// `t = 0` gives `a`, `t = 1` gives `b`. `t` is not clamped.
pub fn lerp<T>(a: T, b: T, t: T) -> T
where
    T: Float
{
    a + (b - a) * t
}

/// Normalise an angle into the range (-pi, pi].
///
/// Used for the signed difference between two headings so that a turn always
/// takes the short way round. Non-finite angles are returned unchanged.
pub fn normalise_angle<T>(angle: T) -> T
where
    T: Float
{
    if !angle.is_finite() {
        return angle;
    }

    let (pi_t, tau_t): (T, T) =
        match (T::from(std::f64::consts::PI), T::from(std::f64::consts::TAU)) {
            (Some(p), Some(t)) => (p, t),
            _ => return angle,
        };

    let mut a = angle;

    // Bring large angles close to the range first so the loops below only
    // ever run a couple of times
    if a.abs() > tau_t + tau_t {
        a = rem_euclid(a + pi_t, tau_t) - pi_t;
    }

    while a > pi_t {
        a = a - tau_t;
    }
    while a <= -pi_t {
        a = a + tau_t;
    }

    a
}

/// Calculates the least nonnegative remainder of `lhs (mod rhs)`.
/// 
/// This function is taken from the std library as num is missing it.
///
/// In particular, the return value `r` satisfies `0.0 <= r < rhs.abs()` in
/// most cases. However, due to a floating point round-off error it can
/// result in `r == rhs.abs()`, violating the mathematical definition, if
/// `self` is much smaller than `rhs.abs()` in magnitude and `self < 0.0`.
pub fn rem_euclid<T>(lhs: T, rhs: T) -> T
where
    T: Float
{
    let r = lhs % rhs;
    if r < T::zero() { r + rhs.abs() } else { r }
}
