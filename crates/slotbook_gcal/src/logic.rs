// --- File: crates/slotbook_gcal/src/logic.rs ---
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone};
use slotbook_common::models::{Availability, BusyInterval, EventType};
use tracing::debug;

/// How a candidate slot that merely touches a busy interval is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlotBoundary {
    /// Intervals sharing an endpoint overlap, so a slot can't start at the
    /// exact minute a (buffered) busy block ends.
    #[default]
    Inclusive,
    /// Touching intervals don't overlap, allowing back-to-back meetings.
    Exclusive,
}

impl SlotBoundary {
    fn overlaps(
        self,
        (a_start, a_end): (NaiveDateTime, NaiveDateTime),
        (b_start, b_end): (NaiveDateTime, NaiveDateTime),
    ) -> bool {
        match self {
            SlotBoundary::Inclusive => a_start <= b_end && b_start <= a_end,
            SlotBoundary::Exclusive => a_start < b_end && b_start < a_end,
        }
    }
}

/// Bookable start times for `day`, using inclusive overlap.
///
/// See [`generate_slots_with`].
pub fn generate_slots<Tz: TimeZone>(
    day: NaiveDate,
    availability: &[Availability],
    event_type: &EventType,
    busy: &[BusyInterval],
    tz: &Tz,
) -> Vec<DateTime<Tz>> {
    generate_slots_with(day, availability, event_type, busy, tz, SlotBoundary::Inclusive)
}

/// Walks the day's availability window in steps of `event_type.duration`
/// and keeps every candidate that doesn't overlap a busy interval.
///
/// Busy intervals are compared in `tz` wall-clock time and extended by
/// `buffer_time` at the end only. Only the first availability row for the
/// weekday is used (Sunday = 0). Stepping is fixed: a busy block that doesn't
/// align to the grid shadows the whole candidate it touches.
///
/// A candidate whose local start doesn't exist in `tz` (DST gap) is skipped;
/// an ambiguous one resolves to the earlier instant.
pub fn generate_slots_with<Tz: TimeZone>(
    day: NaiveDate,
    availability: &[Availability],
    event_type: &EventType,
    busy: &[BusyInterval],
    tz: &Tz,
    boundary: SlotBoundary,
) -> Vec<DateTime<Tz>> {
    let weekday = day.weekday().num_days_from_sunday();
    let Some(window) = availability.iter().find(|a| a.day_of_week == weekday) else {
        debug!("No availability configured for {} (weekday {})", day, weekday);
        return Vec::new();
    };

    // A non-positive duration would never advance the cursor
    if event_type.duration <= 0 {
        return Vec::new();
    }
    let (Some(duration), Some(buffer)) = (
        Duration::try_minutes(event_type.duration),
        Duration::try_minutes(event_type.buffer_time.max(0)),
    ) else {
        debug!(
            duration = event_type.duration,
            buffer_time = event_type.buffer_time,
            "Event type is out of range, no slots"
        );
        return Vec::new();
    };

    let blocked: Vec<(NaiveDateTime, NaiveDateTime)> = busy
        .iter()
        .map(|interval| {
            let start = interval.start.with_timezone(tz).naive_local();
            let end = interval.end.with_timezone(tz).naive_local();
            (start, end.checked_add_signed(buffer).unwrap_or(end))
        })
        .collect();

    let window_end = day.and_time(window.end_time);
    let mut cursor = day.and_time(window.start_time);
    let mut slots = Vec::new();

    while let Some(slot_end) = cursor
        .checked_add_signed(duration)
        .filter(|end| *end <= window_end)
    {
        let taken = blocked
            .iter()
            .any(|busy| boundary.overlaps((cursor, slot_end), *busy));

        if !taken {
            match tz.from_local_datetime(&cursor).earliest() {
                Some(start) => slots.push(start),
                None => debug!("Skipping {} (does not exist in the time zone)", cursor),
            }
        }
        cursor = slot_end;
    }

    slots
}

/// The `count` consecutive dates starting at `today`, as offered by the day picker.
pub fn week_days(today: NaiveDate, count: usize) -> Vec<NaiveDate> {
    today.iter_days().take(count).collect()
}
