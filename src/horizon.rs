//! Hourly horizon-crossing scan.
//!
//! The scan walks the 24 hour boundaries of one local day, interpolating the
//! body's position between its local-midnight values for today and tomorrow,
//! and refines every sign change of the vertical position with a parabola
//! through the two boundary samples and a mid-hour sample. Sub-hour spikes
//! that rise and set between two boundaries go unseen; that resolution limit
//! is part of the method.

#[allow(unused_imports)]
use core_maths::*;

use alloc::vec::Vec;

use crate::math::sign;
use crate::orbit::{adjusted_for_continuity, EquatorialPosition};
use crate::types::{ClockTime, Coordinate, Event, EventKind, HorizonCorrection};

/// Sidereal turn rate: one civil hour advances the hour angle by 15° times
/// this ratio.
const SIDEREAL_RATE: f64 = 1.002_737_9;

/// Scans one local day for horizon crossings.
///
/// `today` and `tomorrow` are the body's positions at this local midnight
/// and the next; `sidereal_midnight` is the local sidereal time at the first
/// of those. Returns the chronological crossing events together with the
/// vertical position at hour 24, which the classifier needs to settle
/// event-less days.
pub(crate) fn find_crossings(
    correction: HorizonCorrection,
    coordinate: Coordinate,
    sidereal_midnight: f64,
    today: EquatorialPosition,
    tomorrow: EquatorialPosition,
) -> (Vec<Event>, f64) {
    let tomorrow = adjusted_for_continuity(today, tomorrow);

    let latitude = coordinate.latitude().to_radians();
    let sin_lat = latitude.sin();
    let cos_lat = latitude.cos();
    let adjusted_zenith = correction.adjusted_zenith();
    let hourly_step = 15.0_f64.to_radians() * SIDEREAL_RATE;

    let ra_span = tomorrow.right_ascension - today.right_ascension;
    let dec_span = tomorrow.declination - today.declination;

    let vertical = |declination: f64, hour_angle: f64| {
        sin_lat * declination.sin() + cos_lat * declination.cos() * hour_angle.cos()
            - adjusted_zenith
    };

    let mut events = Vec::new();

    // Hour 0 comes straight from today's position; every later boundary
    // reuses the previous iteration's sample.
    let mut prev_ra = today.right_ascension;
    let mut prev_dec = today.declination;
    let mut prev_vertical = vertical(prev_dec, sidereal_midnight - prev_ra);

    for hour in 0..24 {
        let hour = f64::from(hour);
        let fraction = (hour + 1.0) / 24.0;

        let ra = today.right_ascension + fraction * ra_span;
        let dec = today.declination + fraction * dec_span;

        let ha_prev = sidereal_midnight + hour * hourly_step - prev_ra;
        let ha = sidereal_midnight + (hour + 1.0) * hourly_step - ra;
        let current_vertical = vertical(dec, ha);

        if sign(prev_vertical) != sign(current_vertical) {
            // Fit V(e) = a·e² + b·e + c through the boundary and mid-hour
            // samples; the root in [0, 1] is the crossing's hour fraction.
            let ha_mid = (ha_prev + ha) / 2.0;
            let dec_mid = (prev_dec + dec) / 2.0;
            let mid_vertical = vertical(dec_mid, ha_mid);

            let a = 2.0 * current_vertical - 4.0 * mid_vertical + 2.0 * prev_vertical;
            let b = 4.0 * mid_vertical - 3.0 * prev_vertical - current_vertical;
            let c = prev_vertical;

            // A negative discriminant means the fit never touches zero; the
            // flip is dropped as an artifact of the approximation.
            let discriminant = b * b - 4.0 * a * c;
            if discriminant >= 0.0 {
                let root = discriminant.sqrt();
                let mut fraction_of_hour = (-b + root) / (2.0 * a);
                if !(0.0..=1.0).contains(&fraction_of_hour) {
                    fraction_of_hour = (-b - root) / (2.0 * a);
                }

                let kind = if prev_vertical < 0.0 {
                    EventKind::Rise
                } else {
                    EventKind::Set
                };
                let ha_event = ha_prev + fraction_of_hour * (ha - ha_prev);

                events.push(Event {
                    kind,
                    azimuth: crossing_azimuth(dec_mid, ha_event, sin_lat, cos_lat),
                    time: ClockTime::from_fractional_hours(hour + fraction_of_hour),
                });
            }
        }

        prev_ra = ra;
        prev_dec = dec;
        prev_vertical = current_vertical;
    }

    (events, prev_vertical)
}

/// Compass azimuth of a crossing, degrees in [0, 360).
///
/// The arctangent quadrant is fixed by the sign of the denominator, then the
/// result is shifted into the compass range.
fn crossing_azimuth(declination: f64, hour_angle: f64, sin_lat: f64, cos_lat: f64) -> f64 {
    let numerator = -declination.cos() * hour_angle.sin();
    let denominator =
        cos_lat * declination.sin() - sin_lat * declination.cos() * hour_angle.cos();

    let mut azimuth = (numerator / denominator).atan().to_degrees();
    if denominator < 0.0 {
        azimuth += 180.0;
    }
    if azimuth < 0.0 {
        azimuth += 360.0;
    }
    if azimuth >= 360.0 {
        azimuth -= 360.0;
    }
    azimuth
}
