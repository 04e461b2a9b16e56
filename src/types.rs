use alloc::vec::Vec;
use chrono::{DateTime, FixedOffset, TimeDelta};
use core::cmp::Ordering;
use core::fmt;
#[allow(unused_imports)]
use core_maths::CoreFloat;
use thiserror::Error;

/// Milliseconds in one civil day.
pub(crate) const MILLIS_PER_DAY: i64 = 86_400_000;

/// Zenith distance of the refracted rise/set horizon, degrees.
const REFRACTED_ZENITH: f64 = 90.833;

/// Errors produced by input validation and domain limits.
///
/// Degenerate sky geometry is never an error: an exact tangency or an
/// unrecognized crossing pattern classifies as [`DayState::Indeterminate`]
/// instead of failing.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculationError {
    #[error("Latitude out of range")]
    LatitudeOutOfRange,
    #[error("Longitude out of range")]
    LongitudeOutOfRange,
    #[error("Time component out of range")]
    TimeComponentOutOfRange,
    #[error("Illumination out of range")]
    IlluminationOutOfRange,
    #[error("Ring thresholds inverted")]
    RingThresholdsInverted,
    #[error("Date past the year 3000, where ΔT is undefined")]
    DeltaTOutOfRange,
}

/// A validated observer location, in degrees.
///
/// Latitude is positive north, longitude positive east.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate, rejecting values outside ±90° / ±180° (NaN
    /// included).
    ///
    /// # Errors
    ///
    /// [`CalculationError::LatitudeOutOfRange`] or
    /// [`CalculationError::LongitudeOutOfRange`].
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CalculationError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CalculationError::LatitudeOutOfRange);
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CalculationError::LongitudeOutOfRange);
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// A horizon threshold: a signed angular offset from the geometric horizon
/// plus a refraction flag.
///
/// The preset constants cover the conventional boundaries; arbitrary offsets
/// build custom bands (photographic "magic hour", aviation minima, and so
/// on). Positive angles raise the threshold above the horizon, negative ones
/// sink it below.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HorizonCorrection {
    angle_from_horizon: f64,
    include_refraction: bool,
}

impl HorizonCorrection {
    /// Rise and set of the body's centre against the refracted horizon
    /// (zenith distance 90.833°).
    pub const OFFICIAL: Self = Self::new(0.0, true);
    /// Civil twilight boundary: centre 6° below the geometric horizon.
    pub const CIVIL: Self = Self::new(-6.0, false);
    /// Nautical twilight boundary: 12° below.
    pub const NAUTICAL: Self = Self::new(-12.0, false);
    /// Astronomical twilight boundary: 18° below.
    pub const ASTRONOMICAL: Self = Self::new(-18.0, false);

    pub const fn new(angle_from_horizon: f64, include_refraction: bool) -> Self {
        Self {
            angle_from_horizon,
            include_refraction,
        }
    }

    pub fn angle_from_horizon(&self) -> f64 {
        self.angle_from_horizon
    }

    pub fn include_refraction(&self) -> bool {
        self.include_refraction
    }

    /// The value the crossing scan compares the body's vertical position
    /// against: `cos(zenith distance) + offset in radians`, with the zenith
    /// widened to 90.833° when refraction is included.
    pub(crate) fn adjusted_zenith(&self) -> f64 {
        let zenith_distance = if self.include_refraction {
            REFRACTED_ZENITH
        } else {
            90.0
        };
        zenith_distance.to_radians().cos() + self.angle_from_horizon.to_radians()
    }
}

/// Direction of a horizon crossing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Rise,
    Set,
}

/// One horizon crossing within the evaluated day.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Event {
    pub kind: EventKind,
    /// Compass azimuth of the crossing point, degrees in [0, 360).
    pub azimuth: f64,
    pub time: ClockTime,
}

/// Day-relative wall-clock time with millisecond resolution.
///
/// `day_offset` counts whole days from the evaluated date's midnight, so a
/// value can point just past the end of the day (ring intervals use +1 for
/// "the following midnight").
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
    second: u8,
    millisecond: u16,
    day_offset: i8,
}

impl ClockTime {
    /// Midnight opening the evaluated day.
    pub const MIDNIGHT: Self = Self {
        hour: 0,
        minute: 0,
        second: 0,
        millisecond: 0,
        day_offset: 0,
    };

    /// Midnight closing the evaluated day.
    pub const NEXT_MIDNIGHT: Self = Self {
        hour: 0,
        minute: 0,
        second: 0,
        millisecond: 0,
        day_offset: 1,
    };

    /// Builds a clock time, validating every component.
    ///
    /// # Errors
    ///
    /// [`CalculationError::TimeComponentOutOfRange`] when the hour exceeds
    /// 23, the minute or second 59, or the millisecond 999.
    pub fn new(
        hour: u8,
        minute: u8,
        second: u8,
        millisecond: u16,
        day_offset: i8,
    ) -> Result<Self, CalculationError> {
        if hour > 23 || minute > 59 || second > 59 || millisecond > 999 {
            return Err(CalculationError::TimeComponentOutOfRange);
        }
        Ok(Self {
            hour,
            minute,
            second,
            millisecond,
            day_offset,
        })
    }

    /// Quantizes fractional hours from the evaluated midnight to the nearest
    /// millisecond. Exactly 24.0 lands on the following midnight.
    pub(crate) fn from_fractional_hours(hours: f64) -> Self {
        Self::from_total_millis((hours * 3_600_000.0).round() as i64)
    }

    pub(crate) fn from_total_millis(total: i64) -> Self {
        let day_offset = total.div_euclid(MILLIS_PER_DAY) as i8;
        let mut rest = total.rem_euclid(MILLIS_PER_DAY);
        let hour = (rest / 3_600_000) as u8;
        rest %= 3_600_000;
        let minute = (rest / 60_000) as u8;
        rest %= 60_000;
        Self {
            hour,
            minute,
            second: (rest / 1_000) as u8,
            millisecond: (rest % 1_000) as u16,
            day_offset,
        }
    }

    /// Signed milliseconds from the evaluated date's midnight, day offset
    /// included.
    pub fn total_millis(&self) -> i64 {
        i64::from(self.day_offset) * MILLIS_PER_DAY
            + i64::from(self.hour) * 3_600_000
            + i64::from(self.minute) * 60_000
            + i64::from(self.second) * 1_000
            + i64::from(self.millisecond)
    }

    /// Offset from the evaluated midnight as a chrono duration.
    pub fn to_time_delta(&self) -> TimeDelta {
        TimeDelta::milliseconds(self.total_millis())
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn second(&self) -> u8 {
        self.second
    }

    pub fn millisecond(&self) -> u16 {
        self.millisecond
    }

    pub fn day_offset(&self) -> i8 {
        self.day_offset
    }
}

// Field-order derive would sort by hour before day offset; order by the
// absolute millisecond value instead.
impl Ord for ClockTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total_millis().cmp(&other.total_millis())
    }
}

impl PartialOrd for ClockTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}.{:03}",
            self.hour, self.minute, self.second, self.millisecond
        )?;
        if self.day_offset != 0 {
            write!(f, " ({:+}d)", self.day_offset)?;
        }
        Ok(())
    }
}

/// Classification of one evaluated day's crossing pattern.
///
/// The set is closed: geometry the pattern rules cannot place (an exact
/// tangency, more than three crossings) lands on
/// [`DayState::Indeterminate`] rather than an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DayState {
    /// Rose, then set. The ordinary pattern.
    RisenAndSet,
    /// Set, then rose: up at both ends of the day, down in between.
    SetAndRisen,
    /// A single rise; still up when the day ended.
    OnlyRisen,
    /// A single set; still down when the day ended.
    OnlySet,
    /// Sun above the threshold the whole day (midnight sun).
    PolarDay,
    /// Sun below the threshold the whole day.
    PolarNight,
    /// Moon above the threshold the whole day.
    FullDay,
    /// Moon below the threshold the whole day.
    FullNight,
    /// Three crossings, opening and closing with a rise.
    RiseSetRise,
    /// Three crossings, opening and closing with a set.
    SetRiseSet,
    /// Rise and set at the same instant, grazed from below.
    RisenIsSet,
    /// Set and rise at the same instant, grazed from above.
    SetIsRisen,
    /// Pattern the rules cannot classify.
    Indeterminate,
}

/// One evaluated solar day: crossings, classification and derived spans.
///
/// Event times are relative to the local midnight that opens the evaluated
/// date; [`SolarDay::event_datetime`] converts them to absolute timestamps.
#[derive(Clone, Debug, PartialEq)]
pub struct SolarDay {
    pub(crate) midnight: DateTime<FixedOffset>,
    pub(crate) events: Vec<Event>,
    pub(crate) state: DayState,
    pub(crate) day_length: Option<TimeDelta>,
    pub(crate) night_length: Option<TimeDelta>,
    pub(crate) meridian_crossing: Option<ClockTime>,
    pub(crate) antimeridian_crossing: Option<ClockTime>,
}

impl SolarDay {
    /// Crossing events in ascending time order (at most three).
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// First rise of the day, if any.
    pub fn rise(&self) -> Option<&Event> {
        self.events.iter().find(|event| event.kind == EventKind::Rise)
    }

    /// First set of the day, if any.
    pub fn set(&self) -> Option<&Event> {
        self.events.iter().find(|event| event.kind == EventKind::Set)
    }

    pub fn state(&self) -> DayState {
        self.state
    }

    /// Total time above the threshold. `None` only for an unclassifiable
    /// day; otherwise this and [`SolarDay::night_length`] sum to 24 hours
    /// exactly.
    pub fn day_length(&self) -> Option<TimeDelta> {
        self.day_length
    }

    /// Total time below the threshold.
    pub fn night_length(&self) -> Option<TimeDelta> {
        self.night_length
    }

    /// Midpoint of the lit span. Defined only for the two canonical
    /// two-event days.
    pub fn meridian_crossing(&self) -> Option<ClockTime> {
        self.meridian_crossing
    }

    /// Midpoint of the dark span, the wrap-around complement of
    /// [`SolarDay::meridian_crossing`].
    pub fn antimeridian_crossing(&self) -> Option<ClockTime> {
        self.antimeridian_crossing
    }

    /// The local midnight all relative times in this result count from.
    pub fn midnight(&self) -> DateTime<FixedOffset> {
        self.midnight
    }

    /// Absolute timestamp of one of this day's events.
    pub fn event_datetime(&self, event: &Event) -> DateTime<FixedOffset> {
        self.midnight + event.time.to_time_delta()
    }

    /// Milliseconds between local midnight and the event.
    pub fn event_offset_millis(&self, event: &Event) -> i64 {
        event.time.total_millis()
    }
}

/// One evaluated lunar day: crossings, classification, derived spans and the
/// Moon's age and illumination at the query instant.
#[derive(Clone, Debug, PartialEq)]
pub struct LunarDay {
    pub(crate) midnight: DateTime<FixedOffset>,
    pub(crate) events: Vec<Event>,
    pub(crate) state: DayState,
    pub(crate) visible_length: Option<TimeDelta>,
    pub(crate) invisible_length: Option<TimeDelta>,
    pub(crate) meridian_crossing: Option<ClockTime>,
    pub(crate) antimeridian_crossing: Option<ClockTime>,
    pub(crate) age_in_days: f64,
    pub(crate) illuminated_percent: f64,
}

impl LunarDay {
    /// Crossing events in ascending time order (at most three).
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// First moonrise of the day, if any.
    pub fn rise(&self) -> Option<&Event> {
        self.events.iter().find(|event| event.kind == EventKind::Rise)
    }

    /// First moonset of the day, if any.
    pub fn set(&self) -> Option<&Event> {
        self.events.iter().find(|event| event.kind == EventKind::Set)
    }

    pub fn state(&self) -> DayState {
        self.state
    }

    /// Total time above the threshold.
    pub fn visible_length(&self) -> Option<TimeDelta> {
        self.visible_length
    }

    /// Total time below the threshold.
    pub fn invisible_length(&self) -> Option<TimeDelta> {
        self.invisible_length
    }

    /// Midpoint of the visible span. Defined only for the two canonical
    /// two-event days.
    pub fn meridian_crossing(&self) -> Option<ClockTime> {
        self.meridian_crossing
    }

    /// Midpoint of the invisible span.
    pub fn antimeridian_crossing(&self) -> Option<ClockTime> {
        self.antimeridian_crossing
    }

    /// Days since the preceding new moon, in [0, synodic month).
    pub fn age_in_days(&self) -> f64 {
        self.age_in_days
    }

    /// Illuminated fraction of the disc, percent in [0, 100].
    pub fn illuminated_percent(&self) -> f64 {
        self.illuminated_percent
    }

    /// The local midnight all relative times in this result count from.
    pub fn midnight(&self) -> DateTime<FixedOffset> {
        self.midnight
    }

    /// Absolute timestamp of one of this day's events.
    pub fn event_datetime(&self, event: &Event) -> DateTime<FixedOffset> {
        self.midnight + event.time.to_time_delta()
    }

    /// Milliseconds between local midnight and the event.
    pub fn event_offset_millis(&self, event: &Event) -> i64 {
        event.time.total_millis()
    }
}
