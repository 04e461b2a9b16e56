use chrono::{DateTime, Datelike, FixedOffset};

use crate::math::{floored_mod, polynomial};
use crate::types::CalculationError;
use core::f64::consts::TAU;

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00 TT).
pub(crate) const J2000: f64 = 2_451_545.0;

/// Julian Date threshold of the Gregorian calendar reform (1582-10-15).
/// Dates past it receive the century leap-year correction.
const GREGORIAN_REFORM: f64 = 2_299_160.0;

/// Last calendar year the ΔT fit is defined for.
const DELTA_T_CEILING: i32 = 3000;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Time reference frame for one evaluated calendar day.
///
/// Every field is a pure function of the query timestamp and the observer
/// longitude. Positions are evaluated in terrestrial time (`days_since_epoch`
/// has ΔT folded in); sidereal time stays in universal time.
#[derive(Copy, Clone, Debug)]
pub(crate) struct TimeBasis {
    /// Days from J2000 at the observer's local midnight, terrestrial time.
    pub days_since_epoch: f64,
    /// Local sidereal time at local midnight, radians.
    pub sidereal_midnight: f64,
}

impl TimeBasis {
    /// Builds the frame for the calendar date of `when`, anchored at local
    /// midnight in `when`'s own UTC offset.
    ///
    /// # Errors
    ///
    /// Fails with [`CalculationError::DeltaTOutOfRange`] for dates past the
    /// year 3000, where the ΔT fit is undefined.
    pub(crate) fn new(
        when: &DateTime<FixedOffset>,
        longitude: f64,
    ) -> Result<Self, CalculationError> {
        let date = when.date_naive();
        let julian_date = julian_day_at_midnight(date.year(), date.month(), date.day());
        let delta_t = estimate_delta_t(date.year(), date.month())?;

        // Signed day fraction placing this zone's midnight on the UT scale.
        let zone_shift = -f64::from(when.offset().local_minus_utc()) / SECONDS_PER_DAY;
        let days_from_epoch = julian_date - J2000;

        Ok(TimeBasis {
            days_since_epoch: days_from_epoch + zone_shift + delta_t / SECONDS_PER_DAY,
            sidereal_midnight: local_sidereal_time(days_from_epoch, longitude, zone_shift),
        })
    }
}

/// Julian Day of a calendar date at 00:00.
///
/// January and February are treated as months 13 and 14 of the previous year
/// (standard step in the Julian Day algorithm). Dates after the Gregorian
/// reform get the century correction; earlier dates fall through to the
/// proleptic Julian calendar.
pub(crate) fn julian_day_at_midnight(year: i32, month: u32, day: u32) -> f64 {
    let mut year = year;
    let mut month = month;
    if month < 3 {
        month += 12;
        year -= 1;
    }

    let mut julian_day = (365.25 * (f64::from(year) + 4716.0)) as i32 as f64
        + (30.6001 * f64::from(month + 1)) as i32 as f64
        + f64::from(day)
        - 1524.5;

    if julian_day > GREGORIAN_REFORM {
        let century = f64::from(year / 100i32);
        julian_day += 2.0 - century + (century / 4.0) as i32 as f64;
    }

    julian_day
}

/// Local sidereal time at local midnight, radians in [0, 2π).
///
/// `days_from_epoch` is the calendar date's 00:00 offset from J2000 in UT,
/// without the zone shift; the 86 636.6 s/day term carries the result to the
/// local-midnight instant (one civil day advances sidereal time by that many
/// seconds). Longitude enters as its fraction of a full turn.
pub(crate) fn local_sidereal_time(days_from_epoch: f64, longitude: f64, zone_shift: f64) -> f64 {
    let centuries = days_from_epoch / 36_525.0;
    let seconds = 24_110.5
        + 8_640_184.813 * centuries
        + 86_636.6 * zone_shift
        + SECONDS_PER_DAY * (longitude / 360.0);
    TAU * floored_mod(seconds / SECONDS_PER_DAY, 1.0)
}

/// Estimated ΔT (TT − UT) in seconds for a calendar month.
///
/// Piecewise polynomial fit keyed by the decimal year `year + (month − 0.5) / 12`,
/// with a long-range parabola outside the tabulated era. The fit ends at the
/// year 3000; later dates are an error rather than an extrapolation.
pub(crate) fn estimate_delta_t(year: i32, month: u32) -> Result<f64, CalculationError> {
    if year > DELTA_T_CEILING {
        return Err(CalculationError::DeltaTOutOfRange);
    }
    let y = f64::from(year) + (f64::from(month) - 0.5) / 12.0;

    let seconds = if y < -500.0 {
        parabolic_delta_t(y)
    } else if y < 500.0 {
        polynomial(
            &[
                10583.6,
                -1014.41,
                33.78311,
                -5.952053,
                -0.1798452,
                0.022174192,
                0.0090316521,
            ],
            y / 100.0,
        )
    } else if y < 1600.0 {
        polynomial(
            &[
                1574.2,
                -556.01,
                71.23472,
                0.319781,
                -0.8503463,
                -0.005050998,
                0.0083572073,
            ],
            (y - 1000.0) / 100.0,
        )
    } else if y < 1700.0 {
        polynomial(&[120.0, -0.9808, -0.01532, 1.0 / 7129.0], y - 1600.0)
    } else if y < 1800.0 {
        polynomial(
            &[8.83, 0.1603, -0.0059285, 0.00013336, -1.0 / 1_174_000.0],
            y - 1700.0,
        )
    } else if y < 1860.0 {
        polynomial(
            &[
                13.72,
                -0.332447,
                0.0068612,
                0.0041116,
                -0.00037436,
                0.0000121272,
                -0.0000001699,
                0.000000000875,
            ],
            y - 1800.0,
        )
    } else if y < 1900.0 {
        polynomial(
            &[
                7.62,
                0.5737,
                -0.251754,
                0.01680668,
                -0.0004473624,
                1.0 / 233_174.0,
            ],
            y - 1860.0,
        )
    } else if y < 1920.0 {
        polynomial(
            &[-2.79, 1.494119, -0.0598939, 0.0061966, -0.000197],
            y - 1900.0,
        )
    } else if y < 1941.0 {
        polynomial(&[21.20, 0.84493, -0.076100, 0.0020936], y - 1920.0)
    } else if y < 1961.0 {
        polynomial(&[29.07, 0.407, -1.0 / 233.0, 1.0 / 2547.0], y - 1950.0)
    } else if y < 1986.0 {
        polynomial(&[45.45, 1.067, -1.0 / 260.0, -1.0 / 718.0], y - 1975.0)
    } else if y < 2005.0 {
        polynomial(
            &[
                63.86,
                0.3345,
                -0.060374,
                0.0017275,
                0.000651814,
                0.00002373599,
            ],
            y - 2000.0,
        )
    } else if y < 2050.0 {
        polynomial(&[62.92, 0.32217, 0.005589], y - 2000.0)
    } else if y < 2150.0 {
        parabolic_delta_t(y) - 0.5628 * (2150.0 - y)
    } else {
        parabolic_delta_t(y)
    };

    Ok(seconds)
}

/// Long-range ΔT parabola anchored at the year 1820.
fn parabolic_delta_t(y: f64) -> f64 {
    let u = (y - 1820.0) / 100.0;
    -20.0 + 32.0 * u * u
}
