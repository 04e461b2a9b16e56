//! Light-phase interval assembly from two horizon thresholds.
//!
//! A "ring" is the band of sky between a lower and an upper threshold, and
//! the intervals it produces are the spans the Sun spends inside that band:
//! twilight between two conventional boundaries, the photographic magic
//! hour, and so on. The builder merges the crossing events of both
//! thresholds and pairs up the transitions that enter and leave the band,
//! synthesizing midnight endpoints for spans already in progress when the
//! day opens or still in progress when it closes.

use alloc::string::String;
use alloc::vec::Vec;
use chrono::{DateTime, FixedOffset, TimeDelta};

use crate::types::{ClockTime, Event, EventKind, SolarDay, MILLIS_PER_DAY};

/// One endpoint of a light-phase interval.
///
/// Synthesized midnight endpoints carry no azimuth.
#[derive(Clone, Debug, PartialEq)]
pub struct EventPoint {
    pub kind: EventKind,
    pub azimuth: Option<f64>,
    pub timestamp: DateTime<FixedOffset>,
}

/// A matched start/finish pair: one span inside the band.
#[derive(Clone, Debug, PartialEq)]
pub struct EventTrack {
    pub start: EventPoint,
    pub finish: EventPoint,
}

impl EventTrack {
    pub fn duration(&self) -> TimeDelta {
        self.finish.timestamp - self.start.timestamp
    }
}

/// The day's spans inside the band, plus the residual spans on either side.
///
/// `daylight_before`, `ring_duration` and `darkness_after` always sum to
/// exactly 24 hours.
#[derive(Clone, Debug, PartialEq)]
pub struct Ring {
    pub(crate) label: String,
    pub(crate) tracks: Vec<EventTrack>,
    pub(crate) daylight_before: TimeDelta,
    pub(crate) ring_duration: TimeDelta,
    pub(crate) darkness_after: TimeDelta,
}

impl Ring {
    /// The name the band was requested under, e.g. `"magic hour"`.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Spans inside the band, in chronological order.
    pub fn tracks(&self) -> &[EventTrack] {
        &self.tracks
    }

    /// Time above the band across the day.
    pub fn daylight_before(&self) -> TimeDelta {
        self.daylight_before
    }

    /// Total time inside the band.
    pub fn ring_duration(&self) -> TimeDelta {
        self.ring_duration
    }

    /// Time below the band across the day.
    pub fn darkness_after(&self) -> TimeDelta {
        self.darkness_after
    }
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum Tier {
    Lower,
    Upper,
}

/// Assembles the band's spans from the two per-threshold day evaluations.
///
/// `lower` and `upper` are the same calendar day run against the band's two
/// thresholds. Entries into the band are a rise through the lower threshold
/// or a set back through the upper one; exits mirror them.
pub(crate) fn build_ring(label: &str, lower: &SolarDay, upper: &SolarDay) -> Ring {
    let midnight = lower.midnight;

    let mut merged: Vec<(Tier, &Event)> = lower
        .events
        .iter()
        .map(|event| (Tier::Lower, event))
        .chain(upper.events.iter().map(|event| (Tier::Upper, event)))
        .collect();
    // Stable sort keeps lower-threshold events ahead of upper ones when
    // they coincide.
    merged.sort_by_key(|entry| entry.1.time);

    let mut tracks = Vec::new();

    // A day that opens inside the band: the first transition out of it gets
    // a synthesized midnight start.
    if let Some(&(tier, event)) = merged.first() {
        if matches!(
            (tier, event.kind),
            (Tier::Lower, EventKind::Set) | (Tier::Upper, EventKind::Rise)
        ) {
            tracks.push(EventTrack {
                start: midnight_point(midnight, ClockTime::MIDNIGHT, EventKind::Rise),
                finish: event_point(midnight, event),
            });
        }
    }

    for pair in merged.windows(2) {
        let (first_tier, first) = pair[0];
        let (second_tier, second) = pair[1];
        let paired = matches!(
            ((first_tier, first.kind), (second_tier, second.kind)),
            // Climb across the band, dawn side.
            ((Tier::Lower, EventKind::Rise), (Tier::Upper, EventKind::Rise))
                // Descent across the band, dusk side.
                | ((Tier::Upper, EventKind::Set), (Tier::Lower, EventKind::Set))
                // Peaked inside the band without reaching the upper threshold.
                | ((Tier::Lower, EventKind::Rise), (Tier::Lower, EventKind::Set))
        );
        if paired {
            tracks.push(EventTrack {
                start: event_point(midnight, first),
                finish: event_point(midnight, second),
            });
        }
    }

    // A day that closes inside the band: the last transition into it gets a
    // synthesized next-midnight finish.
    if let Some(&(tier, event)) = merged.last() {
        if matches!(
            (tier, event.kind),
            (Tier::Lower, EventKind::Rise) | (Tier::Upper, EventKind::Set)
        ) {
            tracks.push(EventTrack {
                start: event_point(midnight, event),
                finish: midnight_point(midnight, ClockTime::NEXT_MIDNIGHT, EventKind::Set),
            });
        }
    }

    let ring_duration = tracks
        .iter()
        .map(EventTrack::duration)
        .fold(TimeDelta::zero(), |total, duration| total + duration);

    let full_day = TimeDelta::milliseconds(MILLIS_PER_DAY);
    let day = lower.day_length;
    let night = lower.night_length;

    // Residuals come from the lower threshold's day/night split; the band
    // itself is carved out of the lit side.
    let mut daylight_before = match (day, night) {
        (Some(day), _) => day - ring_duration,
        (None, Some(night)) => (full_day - night) - ring_duration,
        (None, None) => TimeDelta::zero(),
    };
    let mut darkness_after = match (day, night) {
        (Some(day), _) => full_day - day,
        (None, Some(night)) => night,
        (None, None) => TimeDelta::zero(),
    };
    if daylight_before.is_zero() && darkness_after.is_zero() {
        daylight_before = day.unwrap_or_else(TimeDelta::zero);
        darkness_after = night.unwrap_or_else(TimeDelta::zero);
    }

    Ring {
        label: String::from(label),
        tracks,
        daylight_before,
        ring_duration,
        darkness_after,
    }
}

fn event_point(midnight: DateTime<FixedOffset>, event: &Event) -> EventPoint {
    EventPoint {
        kind: event.kind,
        azimuth: Some(event.azimuth),
        timestamp: midnight + event.time.to_time_delta(),
    }
}

fn midnight_point(
    midnight: DateTime<FixedOffset>,
    at: ClockTime,
    kind: EventKind,
) -> EventPoint {
    EventPoint {
        kind,
        azimuth: None,
        timestamp: midnight + at.to_time_delta(),
    }
}
