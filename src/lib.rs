//! # riseset
//!
//! Rise and set times, twilight bands and lunar phase for any place and date.
//!
//! The crate finds the moments the Sun or the Moon crosses an adjustable
//! horizon threshold over one local calendar day, classifies the resulting
//! pattern (including the polar degeneracies where the body never crosses at
//! all), and derives day length, meridian passage, lunar age and
//! illumination, and named light bands such as twilight and the
//! photographic magic hour.
//!
//! Positions come from low-precision trigonometric series. Rise and set
//! times are good to a minute or two, which is also the practical limit set
//! by refraction variability at the horizon.
//!
//! The crate is `no_std` (with `alloc`) and performs no I/O; every result is
//! a pure function of the inputs.
//!
//! ## Basic Usage
//!
//! ```
//! use chrono::{FixedOffset, TimeZone};
//! use riseset::{Coordinate, SolarCalculator};
//!
//! // Greenwich, at the spring equinox
//! let coordinate = Coordinate::new(51.48, 0.0).unwrap();
//! let calculator = SolarCalculator::new(coordinate);
//!
//! let when = FixedOffset::east_opt(0)
//!     .unwrap()
//!     .with_ymd_and_hms(2023, 3, 20, 12, 0, 0)
//!     .unwrap();
//! let day = calculator.day(when).unwrap();
//!
//! for event in day.events() {
//!     println!("{:?} at {} (azimuth {:.1}°)", event.kind, event.time, event.azimuth);
//! }
//! if let Some(length) = day.day_length() {
//!     println!("day length: {} min", length.num_minutes());
//! }
//! ```
//!
//! The day evaluated is the calendar date of the query timestamp in the
//! timestamp's own UTC offset, and all event times count from that date's
//! local midnight.

#![no_std]

extern crate alloc;

mod day;
mod horizon;
mod math;
mod orbit;
mod phase;
mod ring;
mod time;
mod types;


use alloc::vec::Vec;
use chrono::{DateTime, FixedOffset, TimeDelta, Timelike};
use julian_day_converter::unix_millis_to_julian_day;

use crate::day::{classify, light_dark_lengths, meridian_crossings};
use crate::horizon::find_crossings;
use crate::orbit::{Luminary, Moon, Sun};
use crate::ring::build_ring;
use crate::time::TimeBasis;

pub use crate::orbit::EquatorialPosition;
pub use crate::phase::SYNODIC_MONTH;
pub use crate::ring::{EventPoint, EventTrack, Ring};
pub use crate::types::{
    CalculationError, ClockTime, Coordinate, DayState, Event, EventKind, HorizonCorrection,
    LunarDay, SolarDay,
};

/// Upper bound on the forward scan for the next rise or set.
const MAX_FORWARD_SCAN_DAYS: u32 = 365;

/// Solar rise/set, twilight and light-band calculator for one location.
///
/// # Example
///
/// ```
/// use chrono::{FixedOffset, TimeZone};
/// use riseset::{Coordinate, HorizonCorrection, SolarCalculator};
///
/// let oslo = Coordinate::new(59.91, 10.75).unwrap();
/// let calculator = SolarCalculator::with_correction(oslo, HorizonCorrection::CIVIL);
///
/// let when = FixedOffset::east_opt(3600)
///     .unwrap()
///     .with_ymd_and_hms(2024, 2, 1, 12, 0, 0)
///     .unwrap();
/// let day = calculator.day(when).unwrap();
/// assert!(day.rise().is_some());
/// ```
#[derive(Copy, Clone, Debug)]
pub struct SolarCalculator {
    coordinate: Coordinate,
    correction: HorizonCorrection,
}

impl SolarCalculator {
    /// Calculator against the standard refracted horizon
    /// ([`HorizonCorrection::OFFICIAL`]).
    pub fn new(coordinate: Coordinate) -> Self {
        Self::with_correction(coordinate, HorizonCorrection::OFFICIAL)
    }

    /// Calculator against a custom threshold, such as a twilight boundary.
    pub fn with_correction(coordinate: Coordinate, correction: HorizonCorrection) -> Self {
        Self {
            coordinate,
            correction,
        }
    }

    /// Evaluates the calendar day of `when`.
    ///
    /// The date and the local-midnight anchor both come from `when`'s own
    /// UTC offset. The time of day within the query does not influence the
    /// result.
    ///
    /// # Errors
    ///
    /// [`CalculationError::DeltaTOutOfRange`] for dates past the year 3000.
    pub fn day(&self, when: DateTime<FixedOffset>) -> Result<SolarDay, CalculationError> {
        let evaluation = evaluate_day::<Sun>(self.coordinate, self.correction, &when)?;
        Ok(SolarDay {
            midnight: local_midnight(&when),
            events: evaluation.events,
            state: evaluation.state,
            day_length: evaluation.light_length,
            night_length: evaluation.dark_length,
            meridian_crossing: evaluation.meridian_crossing,
            antimeridian_crossing: evaluation.antimeridian_crossing,
        })
    }

    /// Spans the Sun spends between two thresholds on the calendar day of
    /// `when`.
    ///
    /// `lower` must sit at or below `upper`. The calculator's own threshold
    /// plays no part here; both band edges are given explicitly.
    ///
    /// # Errors
    ///
    /// [`CalculationError::RingThresholdsInverted`] when the band is upside
    /// down, or any error from the underlying day evaluations.
    pub fn ring(
        &self,
        lower: HorizonCorrection,
        upper: HorizonCorrection,
        label: &str,
        when: DateTime<FixedOffset>,
    ) -> Result<Ring, CalculationError> {
        if upper.angle_from_horizon() < lower.angle_from_horizon() {
            return Err(CalculationError::RingThresholdsInverted);
        }
        let lower_day = Self::with_correction(self.coordinate, lower).day(when)?;
        let upper_day = Self::with_correction(self.coordinate, upper).day(when)?;
        Ok(build_ring(label, &lower_day, &upper_day))
    }

    /// Magic hour: the photographer's band from 4° below the horizon to 6°
    /// above it.
    pub fn magic_hour(&self, when: DateTime<FixedOffset>) -> Result<Ring, CalculationError> {
        self.ring(
            HorizonCorrection::new(-4.0, false),
            HorizonCorrection::new(6.0, false),
            "magic hour",
            when,
        )
    }

    /// Blue hour: the Sun between 6° and 4° below the horizon.
    pub fn blue_hour(&self, when: DateTime<FixedOffset>) -> Result<Ring, CalculationError> {
        self.ring(
            HorizonCorrection::new(-6.0, false),
            HorizonCorrection::new(-4.0, false),
            "blue hour",
            when,
        )
    }

    /// Civil twilight: between the civil boundary and the refracted horizon.
    pub fn civil_twilight(&self, when: DateTime<FixedOffset>) -> Result<Ring, CalculationError> {
        self.ring(
            HorizonCorrection::CIVIL,
            HorizonCorrection::OFFICIAL,
            "civil twilight",
            when,
        )
    }

    /// Nautical twilight: between the nautical and civil boundaries.
    pub fn nautical_twilight(
        &self,
        when: DateTime<FixedOffset>,
    ) -> Result<Ring, CalculationError> {
        self.ring(
            HorizonCorrection::NAUTICAL,
            HorizonCorrection::CIVIL,
            "nautical twilight",
            when,
        )
    }

    /// Astronomical twilight: between the astronomical and nautical
    /// boundaries.
    pub fn astronomical_twilight(
        &self,
        when: DateTime<FixedOffset>,
    ) -> Result<Ring, CalculationError> {
        self.ring(
            HorizonCorrection::ASTRONOMICAL,
            HorizonCorrection::NAUTICAL,
            "astronomical twilight",
            when,
        )
    }

    /// First sunrise at or after `from`, scanning at most a year ahead.
    ///
    /// `Ok(None)` means no rise inside the scan window. Useful mostly near
    /// the poles, where the next rise may be months away.
    ///
    /// # Errors
    ///
    /// [`CalculationError::DeltaTOutOfRange`] when the scan runs past the
    /// year 3000.
    pub fn next_rise(
        &self,
        from: DateTime<FixedOffset>,
    ) -> Result<Option<DateTime<FixedOffset>>, CalculationError> {
        next_event_of::<Sun>(self.coordinate, self.correction, from, EventKind::Rise)
    }

    /// First sunset at or after `from`, scanning at most a year ahead.
    ///
    /// # Errors
    ///
    /// Same as [`SolarCalculator::next_rise`].
    pub fn next_set(
        &self,
        from: DateTime<FixedOffset>,
    ) -> Result<Option<DateTime<FixedOffset>>, CalculationError> {
        next_event_of::<Sun>(self.coordinate, self.correction, from, EventKind::Set)
    }
}

/// Lunar rise/set and phase calculator for one location.
///
/// Moonrise drifts roughly 50 minutes later each day, so unlike the Sun the
/// Moon routinely produces days with a set but no rise (or the reverse) at
/// any latitude.
#[derive(Copy, Clone, Debug)]
pub struct LunarCalculator {
    coordinate: Coordinate,
    correction: HorizonCorrection,
}

impl LunarCalculator {
    /// Calculator against the standard refracted horizon
    /// ([`HorizonCorrection::OFFICIAL`]).
    pub fn new(coordinate: Coordinate) -> Self {
        Self::with_correction(coordinate, HorizonCorrection::OFFICIAL)
    }

    /// Calculator against a custom threshold.
    pub fn with_correction(coordinate: Coordinate, correction: HorizonCorrection) -> Self {
        Self {
            coordinate,
            correction,
        }
    }

    /// Evaluates the calendar day of `when`, including the Moon's age and
    /// illuminated fraction at the query instant.
    ///
    /// Crossings depend only on the calendar date, but age and illumination
    /// are sampled at `when` itself and move through the day.
    ///
    /// # Errors
    ///
    /// [`CalculationError::DeltaTOutOfRange`] for dates past the year 3000,
    /// or [`CalculationError::IlluminationOutOfRange`] should the phase
    /// model ever step outside 0..=100 percent.
    pub fn day(&self, when: DateTime<FixedOffset>) -> Result<LunarDay, CalculationError> {
        let evaluation = evaluate_day::<Moon>(self.coordinate, self.correction, &when)?;

        let julian_date = unix_millis_to_julian_day(when.timestamp_millis());
        let age_in_days = phase::age_in_days(julian_date);
        let illuminated_percent = phase::illuminated_percent(julian_date);
        if !(0.0..=100.0).contains(&illuminated_percent) {
            return Err(CalculationError::IlluminationOutOfRange);
        }

        Ok(LunarDay {
            midnight: local_midnight(&when),
            events: evaluation.events,
            state: evaluation.state,
            visible_length: evaluation.light_length,
            invisible_length: evaluation.dark_length,
            meridian_crossing: evaluation.meridian_crossing,
            antimeridian_crossing: evaluation.antimeridian_crossing,
            age_in_days,
            illuminated_percent,
        })
    }

    /// First moonrise at or after `from`, scanning at most a year ahead.
    ///
    /// # Errors
    ///
    /// [`CalculationError::DeltaTOutOfRange`] when the scan runs past the
    /// year 3000.
    pub fn next_rise(
        &self,
        from: DateTime<FixedOffset>,
    ) -> Result<Option<DateTime<FixedOffset>>, CalculationError> {
        next_event_of::<Moon>(self.coordinate, self.correction, from, EventKind::Rise)
    }

    /// First moonset at or after `from`, scanning at most a year ahead.
    ///
    /// # Errors
    ///
    /// Same as [`LunarCalculator::next_rise`].
    pub fn next_set(
        &self,
        from: DateTime<FixedOffset>,
    ) -> Result<Option<DateTime<FixedOffset>>, CalculationError> {
        next_event_of::<Moon>(self.coordinate, self.correction, from, EventKind::Set)
    }
}

struct DayEvaluation {
    events: Vec<Event>,
    state: DayState,
    light_length: Option<TimeDelta>,
    dark_length: Option<TimeDelta>,
    meridian_crossing: Option<ClockTime>,
    antimeridian_crossing: Option<ClockTime>,
}

/// Runs the full pipeline for one body and one calendar day: time basis,
/// positions at this midnight and the next, crossing scan, classification,
/// span metrics.
fn evaluate_day<L: Luminary>(
    coordinate: Coordinate,
    correction: HorizonCorrection,
    when: &DateTime<FixedOffset>,
) -> Result<DayEvaluation, CalculationError> {
    let basis = TimeBasis::new(when, coordinate.longitude())?;

    let today = L::position(basis.days_since_epoch);
    let tomorrow = L::position(basis.days_since_epoch + 1.0);

    let (events, final_vertical) = find_crossings(
        correction,
        coordinate,
        basis.sidereal_midnight,
        today,
        tomorrow,
    );
    let state = classify(&events, final_vertical, L::ALL_ABOVE, L::ALL_BELOW);
    let (light_length, dark_length) = light_dark_lengths(&events, state);
    let (meridian_crossing, antimeridian_crossing) = meridian_crossings(&events, state);

    Ok(DayEvaluation {
        events,
        state,
        light_length,
        dark_length,
        meridian_crossing,
        antimeridian_crossing,
    })
}

/// Walks forward one day at a time until an event of `kind` lands at or
/// after `from`, up to [`MAX_FORWARD_SCAN_DAYS`].
fn next_event_of<L: Luminary>(
    coordinate: Coordinate,
    correction: HorizonCorrection,
    from: DateTime<FixedOffset>,
    kind: EventKind,
) -> Result<Option<DateTime<FixedOffset>>, CalculationError> {
    let mut cursor = from;
    for _ in 0..MAX_FORWARD_SCAN_DAYS {
        let evaluation = evaluate_day::<L>(coordinate, correction, &cursor)?;
        let midnight = local_midnight(&cursor);

        // A day can hold two events of one kind; take the first not behind
        // `from`.
        if let Some(timestamp) = evaluation
            .events
            .iter()
            .filter(|event| event.kind == kind)
            .map(|event| midnight + event.time.to_time_delta())
            .find(|timestamp| *timestamp >= from)
        {
            return Ok(Some(timestamp));
        }
        cursor += TimeDelta::days(1);
    }
    Ok(None)
}

/// Midnight of `when`'s calendar date, in `when`'s own offset.
fn local_midnight(when: &DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    let time = when.time();
    let since_midnight = TimeDelta::seconds(i64::from(time.num_seconds_from_midnight()))
        + TimeDelta::nanoseconds(i64::from(time.nanosecond()));
    *when - since_midnight
}
