//! Day-pattern classification and the span metrics derived from it.

use chrono::TimeDelta;

use crate::types::{ClockTime, DayState, Event, EventKind, MILLIS_PER_DAY};

/// Maps one day's crossing pattern to its terminal state.
///
/// `all_above` and `all_below` are the luminary-specific names for the
/// zero-event outcomes. `final_vertical` is the hour-24 vertical position
/// from the crossing scan; its sign settles event-less days and breaks the
/// tie when two crossings land on the same millisecond.
pub(crate) fn classify(
    events: &[Event],
    final_vertical: f64,
    all_above: DayState,
    all_below: DayState,
) -> DayState {
    match events {
        [] => {
            if final_vertical > 0.0 {
                all_above
            } else if final_vertical < 0.0 {
                all_below
            } else {
                DayState::Indeterminate
            }
        }
        [single] => match single.kind {
            EventKind::Rise => DayState::OnlyRisen,
            EventKind::Set => DayState::OnlySet,
        },
        [first, second] => classify_pair(first, second, final_vertical),
        [first, middle, last] => {
            if first.kind == last.kind && first.kind != middle.kind {
                match first.kind {
                    EventKind::Rise => DayState::RiseSetRise,
                    EventKind::Set => DayState::SetRiseSet,
                }
            } else {
                DayState::Indeterminate
            }
        }
        _ => DayState::Indeterminate,
    }
}

fn classify_pair(first: &Event, second: &Event, final_vertical: f64) -> DayState {
    if first.time == second.time {
        // The flips cancel, so the sign the day held before the grazing
        // instant survives to hour 24: negative means it came from below.
        return if final_vertical < 0.0 {
            DayState::RisenIsSet
        } else {
            DayState::SetIsRisen
        };
    }
    match (first.kind, second.kind) {
        (EventKind::Rise, EventKind::Set) => DayState::RisenAndSet,
        (EventKind::Set, EventKind::Rise) => DayState::SetAndRisen,
        _ => DayState::Indeterminate,
    }
}

/// Total light and dark spans across the 24 h window.
///
/// Events are already millisecond-quantized, so the two spans are computed
/// in integer milliseconds and sum to exactly 24 hours. Unclassifiable days
/// get no spans at all.
pub(crate) fn light_dark_lengths(
    events: &[Event],
    state: DayState,
) -> (Option<TimeDelta>, Option<TimeDelta>) {
    match state {
        DayState::Indeterminate => return (None, None),
        DayState::PolarDay | DayState::FullDay => {
            return (
                Some(TimeDelta::milliseconds(MILLIS_PER_DAY)),
                Some(TimeDelta::zero()),
            )
        }
        DayState::PolarNight | DayState::FullNight => {
            return (
                Some(TimeDelta::zero()),
                Some(TimeDelta::milliseconds(MILLIS_PER_DAY)),
            )
        }
        _ => {}
    }

    let Some(first) = events.first() else {
        return (None, None);
    };

    // The span before the first event is dark when that event is a rise,
    // light when it is a set.
    let mut lit = first.kind == EventKind::Set;
    let mut light_millis = 0_i64;
    let mut cursor = 0_i64;

    for event in events {
        let at = event.time.total_millis();
        if lit {
            light_millis += at - cursor;
        }
        cursor = at;
        lit = event.kind == EventKind::Rise;
    }
    if lit {
        light_millis += MILLIS_PER_DAY - cursor;
    }

    (
        Some(TimeDelta::milliseconds(light_millis)),
        Some(TimeDelta::milliseconds(MILLIS_PER_DAY - light_millis)),
    )
}

/// Meridian (mid-light) and antimeridian (mid-dark) passage times.
///
/// Defined only for the two canonical two-event days. Each midpoint is
/// reached by walking half the span from the first event, wrapping at the
/// day boundary when the span straddles midnight.
pub(crate) fn meridian_crossings(
    events: &[Event],
    state: DayState,
) -> (Option<ClockTime>, Option<ClockTime>) {
    let (first, second) = match (state, events) {
        (DayState::RisenAndSet | DayState::SetAndRisen, [first, second]) => (first, second),
        _ => return (None, None),
    };

    let start = first.time.total_millis();
    let span = second.time.total_millis() - start;
    let complement = MILLIS_PER_DAY - span;

    let mid_span = wrap_clock(start + span / 2);
    let mid_complement = wrap_clock(start - complement / 2);

    match state {
        // Span between rise and set is the lit one.
        DayState::RisenAndSet => (Some(mid_span), Some(mid_complement)),
        _ => (Some(mid_complement), Some(mid_span)),
    }
}

fn wrap_clock(millis: i64) -> ClockTime {
    ClockTime::from_total_millis(millis.rem_euclid(MILLIS_PER_DAY))
}
