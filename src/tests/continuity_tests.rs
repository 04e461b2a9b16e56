//! Continuity tests for the day evaluation pipeline.
//!
//! Consecutive days must produce smoothly drifting event times and the
//! underlying series must advance at their physical rates. Sudden jumps
//! point at a broken interpolation seam or a wrap-around bug.

extern crate std;
use chrono::{DateTime, FixedOffset, TimeDelta, TimeZone};
use proptest::prelude::*;

use crate::orbit::{adjusted_for_continuity, position_of_moon, position_of_sun};
use crate::{Coordinate, LunarCalculator, SolarCalculator};

/// Day-to-day drift between two event instants, measured on the 24h clock
/// circle. An event sitting within minutes of civil midnight lands on
/// opposite sides of 00:00 on consecutive days, and the raw difference then
/// spans nearly a full day even though the event itself barely moved.
fn clock_circle_drift(previous: DateTime<FixedOffset>, current: DateTime<FixedOffset>) -> TimeDelta {
    let wrapped = (current - previous).num_minutes().rem_euclid(24 * 60);
    TimeDelta::minutes(wrapped.min(24 * 60 - wrapped))
}

proptest! {
    #[test]
    fn sunrise_drifts_smoothly_over_consecutive_days(
        year in 1900i32..=2100i32,
        month in 1u32..=12u32,
        day in 1u32..=28u32,
        latitude in -80.0_f64..=80.0_f64,
        longitude in -179.0_f64..=179.0_f64,
        offset_hours in -12i32..=12i32,
    ) {
        let coordinate = Coordinate::new(latitude, longitude).unwrap();
        let calculator = SolarCalculator::new(coordinate);
        let offset = FixedOffset::east_opt(offset_hours * 3600).unwrap();
        let start = offset.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap();

        // Near the polar circles the shoulder days of a polar season drift
        // fast; elsewhere sunrise moves by minutes per day.
        let max_jump = if latitude.abs() > 60.0 {
            TimeDelta::hours(3)
        } else {
            TimeDelta::hours(1)
        };

        let mut previous_rise: Option<DateTime<FixedOffset>> = None;
        let mut previous_set: Option<DateTime<FixedOffset>> = None;

        for day_index in 0..10 {
            let result = calculator.day(start + TimeDelta::days(day_index)).unwrap();
            let rise = result.rise().map(|event| result.event_datetime(event));
            let set = result.set().map(|event| result.event_datetime(event));

            if let (Some(prev), Some(curr)) = (previous_rise, rise) {
                let drift = clock_circle_drift(prev, curr);
                prop_assert!(
                    drift <= max_jump,
                    "Sunrise jumped {} minutes between consecutive days. \
                     Max allowed: {} minutes. lat={}, lon={}, yesterday={}, today={}",
                    drift.num_minutes(),
                    max_jump.num_minutes(),
                    latitude,
                    longitude,
                    prev,
                    curr
                );
            }
            if let (Some(prev), Some(curr)) = (previous_set, set) {
                let drift = clock_circle_drift(prev, curr);
                prop_assert!(
                    drift <= max_jump,
                    "Sunset jumped {} minutes between consecutive days. \
                     Max allowed: {} minutes. lat={}, lon={}, yesterday={}, today={}",
                    drift.num_minutes(),
                    max_jump.num_minutes(),
                    latitude,
                    longitude,
                    prev,
                    curr
                );
            }

            // Days without the event reset the chain.
            previous_rise = rise;
            previous_set = set;
        }
    }

    #[test]
    fn moonrise_retards_day_by_day(
        year in 1900i32..=2100i32,
        month in 1u32..=12u32,
        day in 1u32..=28u32,
        latitude in -50.0_f64..=50.0_f64,
        longitude in -179.0_f64..=179.0_f64,
    ) {
        let coordinate = Coordinate::new(latitude, longitude).unwrap();
        let calculator = LunarCalculator::new(coordinate);
        let offset = FixedOffset::east_opt(0).unwrap();
        let start = offset.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap();

        let mut previous_rise: Option<DateTime<FixedOffset>> = None;

        for day_index in 0..10 {
            let result = calculator.day(start + TimeDelta::days(day_index)).unwrap();
            let rise = result.rise().map(|event| result.event_datetime(event));

            if let (Some(prev), Some(curr)) = (previous_rise, rise) {
                let drift = clock_circle_drift(prev, curr);
                prop_assert!(
                    drift <= TimeDelta::hours(3),
                    "Moonrise jumped {} minutes between consecutive days. \
                     lat={}, lon={}, yesterday={}, today={}",
                    drift.num_minutes(),
                    latitude,
                    longitude,
                    prev,
                    curr
                );
            }
            previous_rise = rise;
        }
    }

    #[test]
    fn sun_right_ascension_advances_at_the_annual_rate(days in -20_000i32..=20_000i32) {
        let days = f64::from(days) + 0.5;
        let today = position_of_sun(days);
        let tomorrow = adjusted_for_continuity(today, position_of_sun(days + 1.0));

        let advance = tomorrow.right_ascension - today.right_ascension;
        prop_assert!(
            (0.014..=0.021).contains(&advance),
            "solar right ascension advanced {} rad in one day",
            advance
        );
    }

    #[test]
    fn moon_right_ascension_advances_at_the_monthly_rate(days in -20_000i32..=20_000i32) {
        let days = f64::from(days) + 0.5;
        let today = position_of_moon(days);
        let tomorrow = adjusted_for_continuity(today, position_of_moon(days + 1.0));

        let advance = tomorrow.right_ascension - today.right_ascension;
        prop_assert!(
            (0.12..=0.35).contains(&advance),
            "lunar right ascension advanced {} rad in one day",
            advance
        );
    }
}
