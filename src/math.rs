#[allow(unused_imports)]
use core_maths::CoreFloat;

use core::f64::consts::TAU;

/// Normalizes a fractional-turn angle to radians in [0, 2π).
///
/// The orbital series express mean angles as fractions of a whole turn; the
/// input may be any number of turns, including negative values for dates
/// before the epoch.
pub(crate) fn normalize_turn(turns: f64) -> f64 {
    TAU * floored_mod(turns, 1.0)
}

/// Computes a polynomial using Horner's method for numerical stability.
///
/// Coefficients are ordered [a₀, a₁, a₂, ...] for a₀ + a₁x + a₂x² + ...
pub(crate) fn polynomial(coeffs: &[f64], x: f64) -> f64 {
    let Some(&last) = coeffs.last() else {
        return 0.0;
    };

    // Horner's method: reverse iteration for numerical stability
    let mut result = last;
    for &coeff in coeffs.iter().rev().skip(1) {
        result = result.mul_add(x, coeff);
    }
    result
}

/// Computes the floored modulo operation (Python-style modulo).
///
/// Unlike Rust's `%` operator which can return negative values, this function
/// always returns a non-negative result in the range [0, m). Mean-angle
/// normalization depends on this: a divisor-sign modulo would silently flip
/// angles for pre-epoch dates.
///
/// # Arguments
///
/// * `x` - The dividend
/// * `m` - The modulus (must be positive)
///
/// # Returns
///
/// The remainder `x mod m` in the range [0, m)
///
/// # Examples
///
/// ```
/// # fn floored_mod(x: f64, m: f64) -> f64 { ((x % m) + m) % m }
/// assert_eq!(floored_mod(7.0, 3.0), 1.0);
/// assert_eq!(floored_mod(-7.0, 3.0), 2.0);  // Unlike -7 % 3 which would be -1
/// assert_eq!(floored_mod(1.5, 1.0), 0.5);
/// ```
pub(crate) fn floored_mod(x: f64, m: f64) -> f64 {
    ((x % m) + m) % m
}

/// Sign of `x` with zero kept distinct: 1, -1, or 0.
///
/// `f64::signum` maps +0.0 to 1.0, which would hide an exact-tangency
/// boundary from the crossing scan.
pub(crate) fn sign(x: f64) -> i8 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}
