#[cfg(test)]
mod tests {
    use crate::logic::generate_slots;
    use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Utc};
    use proptest::prelude::*;
    use slotbook_common::models::{Availability, BusyInterval, EventType};

    fn day() -> NaiveDate {
        // Wednesday
        NaiveDate::from_ymd_opt(2025, 5, 7).unwrap()
    }

    // Busy blocks expressed as (start minute of day, length in minutes)
    fn to_busy(blocks: &[(i64, i64)]) -> Vec<BusyInterval> {
        let midnight = Utc.from_utc_datetime(&day().and_hms_opt(0, 0, 0).unwrap());
        blocks
            .iter()
            .map(|(start, len)| BusyInterval {
                start: midnight + Duration::minutes(*start),
                end: midnight + Duration::minutes(start + len),
            })
            .collect()
    }

    proptest! {
        #[test]
        fn test_slots_stay_inside_window_and_on_grid(
            start_hour in 0..12u32,
            end_hour in 12..24u32,
            duration in 5..180i64,
            buffer in 0..60i64,
            blocks in prop::collection::vec((0..1440i64, 1..240i64), 0..6),
        ) {
            let window_start = NaiveTime::from_hms_opt(start_hour, 0, 0).unwrap();
            let window_end = NaiveTime::from_hms_opt(end_hour, 0, 0).unwrap();
            let availability = [Availability { day_of_week: 3, start_time: window_start, end_time: window_end }];
            let event_type = EventType { duration, buffer_time: buffer };
            let busy = to_busy(&blocks);

            let slots = generate_slots(day(), &availability, &event_type, &busy, &Utc);

            let first_possible = day().and_time(window_start);
            let last_end = day().and_time(window_end);
            for slot in &slots {
                let start = slot.naive_utc();
                prop_assert!(start >= first_possible);
                prop_assert!(start + Duration::minutes(duration) <= last_end);
                prop_assert_eq!((start - first_possible).num_minutes() % duration, 0);
            }
            for pair in slots.windows(2) {
                prop_assert!(pair[0] < pair[1]);
            }
        }

        #[test]
        fn test_slots_never_touch_buffered_busy_blocks(
            duration in 10..120i64,
            buffer in 0..45i64,
            blocks in prop::collection::vec((360..1200i64, 1..180i64), 1..5),
        ) {
            let availability = [Availability {
                day_of_week: 3,
                start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
            }];
            let event_type = EventType { duration, buffer_time: buffer };
            let busy = to_busy(&blocks);

            let slots = generate_slots(day(), &availability, &event_type, &busy, &Utc);

            for slot in &slots {
                let slot_start = slot.with_timezone(&Utc);
                let slot_end = slot_start + Duration::minutes(duration);
                for interval in &busy {
                    let blocked_until = interval.end + Duration::minutes(buffer);
                    let overlaps = slot_start <= blocked_until && interval.start <= slot_end;
                    prop_assert!(!overlaps, "slot {} overlaps {:?}", slot_start, interval);
                }
            }
        }

        #[test]
        fn test_generation_is_pure(
            duration in 5..90i64,
            blocks in prop::collection::vec((0..1440i64, 1..120i64), 0..4),
        ) {
            let availability = [Availability {
                day_of_week: 3,
                start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            }];
            let event_type = EventType { duration, buffer_time: 0 };
            let busy = to_busy(&blocks);

            let first = generate_slots(day(), &availability, &event_type, &busy, &Utc);
            let second = generate_slots(day(), &availability, &event_type, &busy, &Utc);
            prop_assert_eq!(first, second);
        }
    }
}
