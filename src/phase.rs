//! Lunar age and illuminated fraction.
//!
//! Both quantities come from the mean synodic cycle alone, with no
//! phase-angle geometry: good to a fraction of a day in age and a few
//! percent in illumination, which is what a calendar or photography planner
//! needs.

#[allow(unused_imports)]
use core_maths::CoreFloat;

use core::f64::consts::TAU;

use crate::math::floored_mod;

/// Mean interval between successive new moons, in days.
pub const SYNODIC_MONTH: f64 = 29.530_588_853;

/// Julian Date of a reference new moon (2000-01-06 18:14 UT).
const NEW_MOON_EPOCH: f64 = 2_451_550.1;

/// Days since the preceding new moon, in [0, [`SYNODIC_MONTH`]).
pub(crate) fn age_in_days(julian_date: f64) -> f64 {
    SYNODIC_MONTH * floored_mod((julian_date - NEW_MOON_EPOCH) / SYNODIC_MONTH, 1.0)
}

/// Illuminated fraction of the lunar disc, in percent.
///
/// A symmetric cosine over the synodic cycle, sampled at the age and one day
/// earlier and averaged. The half-month offset puts the peak at full moon.
pub(crate) fn illuminated_percent(julian_date: f64) -> f64 {
    let age = age_in_days(julian_date);
    (illumination_at(age - 1.0) + illumination_at(age)) / 2.0
}

fn illumination_at(age: f64) -> f64 {
    50.0 * (1.0 + (TAU * (age + SYNODIC_MONTH / 2.0) / SYNODIC_MONTH).cos())
}
