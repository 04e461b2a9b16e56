//! Low-precision geocentric positions for the Sun and the Moon.
//!
//! Each body evaluates a handful of mean orbital angles and a short table of
//! periodic terms, then converts the result to equatorial coordinates. The
//! series are accurate to a few arcminutes over several centuries around
//! J2000, which places a rise or set within a minute or two of the true
//! instant. Inputs are days from J2000 in terrestrial time.

#[allow(unused_imports)]
use core_maths::*;

use core::f64::consts::TAU;

use crate::math::normalize_turn;
use crate::types::DayState;

/// Geocentric equatorial coordinates, radians.
///
/// Right ascension is left un-normalized by the continuity adjustment, so
/// consecutive days interpolate monotonically across the 2π wrap.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EquatorialPosition {
    pub right_ascension: f64,
    pub declination: f64,
}

/// A body the crossing scan can track, with the names its all-day states go
/// by.
pub(crate) trait Luminary {
    /// Position at the given days from J2000, terrestrial time.
    fn position(days_since_epoch: f64) -> EquatorialPosition;

    /// State reported when the body never drops below the threshold.
    const ALL_ABOVE: DayState;
    /// State reported when the body never climbs above the threshold.
    const ALL_BELOW: DayState;
}

pub(crate) struct Sun;

impl Luminary for Sun {
    fn position(days_since_epoch: f64) -> EquatorialPosition {
        position_of_sun(days_since_epoch)
    }

    const ALL_ABOVE: DayState = DayState::PolarDay;
    const ALL_BELOW: DayState = DayState::PolarNight;
}

pub(crate) struct Moon;

impl Luminary for Moon {
    fn position(days_since_epoch: f64) -> EquatorialPosition {
        position_of_moon(days_since_epoch)
    }

    const ALL_ABOVE: DayState = DayState::FullDay;
    const ALL_BELOW: DayState = DayState::FullNight;
}

/// Solar position from the two-angle series.
///
/// `l` is the Sun's mean longitude and `g` its mean anomaly, both as turn
/// fractions unwound to radians. The largest periodic term (0.39785 sin L)
/// is the obliquity projection; the rest correct for orbital eccentricity
/// and the slow drift of the ecliptic.
pub(crate) fn position_of_sun(days_since_epoch: f64) -> EquatorialPosition {
    let centuries = days_since_epoch / 36_525.0;

    let l = normalize_turn(0.779_072 + 0.002_737_909_31 * days_since_epoch);
    let g = normalize_turn(0.993_126 + 0.002_737_778_5 * days_since_epoch);

    let v = 0.39785 * l.sin() - 0.01000 * (l - g).sin() + 0.00333 * (l + g).sin()
        - 0.00021 * centuries * l.sin();
    let u = 1.0 - 0.03349 * g.cos() - 0.00014 * (2.0 * l).cos() + 0.00008 * l.cos();
    let w = -0.00010 - 0.04129 * (2.0 * l).sin() + 0.03211 * g.sin()
        + 0.00104 * (2.0 * l - g).sin()
        - 0.00035 * (2.0 * l + g).sin()
        - 0.00008 * centuries * g.sin();

    equatorial(l, u, v, w)
}

/// Lunar position from the five-angle series.
///
/// Mean angles: `h` mean longitude, `m` mean anomaly, `f` argument of
/// latitude, `d` mean elongation from the Sun, `n` longitude of the
/// ascending node, plus the Sun's mean anomaly `g` for the evection terms.
pub(crate) fn position_of_moon(days_since_epoch: f64) -> EquatorialPosition {
    let h = normalize_turn(0.606_434 + 0.036_601_101_29 * days_since_epoch);
    let m = normalize_turn(0.374_897 + 0.036_291_647_09 * days_since_epoch);
    let f = normalize_turn(0.259_091 + 0.036_748_195_20 * days_since_epoch);
    let d = normalize_turn(0.827_362 + 0.033_863_191_98 * days_since_epoch);
    let n = normalize_turn(0.347_343 - 0.000_147_093_91 * days_since_epoch);
    let g = normalize_turn(0.993_126 + 0.002_737_778_5 * days_since_epoch);

    let v = 0.39558 * (f + n).sin()
        + 0.08200 * f.sin()
        + 0.03257 * (m - f - n).sin()
        + 0.01092 * (m + f + n).sin()
        + 0.00666 * (m - f).sin()
        - 0.00644 * (m + f - 2.0 * d + n).sin()
        - 0.00331 * (f - 2.0 * d + n).sin()
        - 0.00304 * (f - 2.0 * d).sin()
        - 0.00240 * (m - f - 2.0 * d - n).sin()
        + 0.00226 * (m + f).sin()
        - 0.00108 * (m + f - 2.0 * d).sin()
        - 0.00079 * (f - n).sin()
        + 0.00078 * (f + 2.0 * d + n).sin();

    let u = 1.0 - 0.10828 * m.cos() - 0.01880 * (m - 2.0 * d).cos() - 0.01479 * (2.0 * d).cos()
        + 0.00181 * (2.0 * m - 2.0 * d).cos()
        - 0.00147 * (2.0 * m).cos()
        - 0.00105 * (2.0 * d - g).cos()
        - 0.00075 * (m - 2.0 * d + g).cos();

    let w = 0.10478 * m.sin() - 0.04105 * (2.0 * f + 2.0 * n).sin() - 0.01313 * (2.0 * d).sin()
        + 0.01043 * (2.0 * f + n).sin()
        - 0.00696 * (m - 2.0 * d).sin()
        - 0.00391 * (m - 2.0 * f - 2.0 * n).sin()
        - 0.00211 * (m - 2.0 * d + g).sin()
        + 0.00205 * (m - 2.0 * f - n).sin();

    equatorial(h, u, v, w)
}

/// Converts a series evaluation to equatorial coordinates.
///
/// `v` is the vertical component, `w` the in-plane offset from the mean
/// longitude, and `u` the normalization factor for the radius.
fn equatorial(mean_longitude: f64, u: f64, v: f64, w: f64) -> EquatorialPosition {
    EquatorialPosition {
        right_ascension: mean_longitude + (w / (u - v * v).sqrt()).asin(),
        declination: (v / u.sqrt()).asin(),
    }
}

/// Unwraps tomorrow's right ascension past today's when the series wrapped
/// at 2π, keeping the day-boundary interpolation monotone.
pub(crate) fn adjusted_for_continuity(
    today: EquatorialPosition,
    mut tomorrow: EquatorialPosition,
) -> EquatorialPosition {
    if tomorrow.right_ascension < today.right_ascension {
        tomorrow.right_ascension += TAU;
    }
    tomorrow
}
