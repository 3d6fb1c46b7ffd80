//! Bookable start-time computation.
//!
//! A day's candidate start times are generated per open sub-range on a fixed
//! step. A candidate survives when the whole service fits inside the sub-range,
//! it does not overlap a busy interval, and (for today) it starts at least the
//! lead time after now.

use std::collections::{BTreeSet, HashMap};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use super::types::{AvailabilityRules, BusyInterval, OpeningHours};
use crate::storage::DateRange;

/// Everything the scan needs to know about one salon day.
#[derive(Debug, Clone, Copy)]
pub struct SlotQuery<'a> {
    pub date: NaiveDate,
    /// Opening hours for the day; None means the day was never opened.
    pub hours: Option<&'a OpeningHours>,
    /// Intervals held by blocking reservations on the same day.
    pub busy: &'a [BusyInterval],
    pub duration_minutes: u32,
    /// Current salon-local wall time.
    pub now: NaiveDateTime,
}

/// Computes the sorted, de-duplicated start times bookable for the query.
pub fn available_slots(query: &SlotQuery<'_>, rules: &AvailabilityRules) -> Vec<NaiveTime> {
    let Some(hours) = query.hours else {
        return Vec::new();
    };
    if hours.is_closed || query.duration_minutes == 0 {
        return Vec::new();
    }

    let today = query.now.date();
    if query.date < today {
        return Vec::new();
    }

    // Seconds are counted in u64 so large durations or rules cannot overflow.
    let step_secs = u64::from(rules.step_minutes.max(1)) * 60;
    let duration_secs = u64::from(query.duration_minutes) * 60;
    let earliest_secs = if query.date == today {
        u64::from(query.now.time().num_seconds_from_midnight())
            + u64::from(rules.lead_minutes) * 60
    } else {
        0
    };

    let mut starts = BTreeSet::new();
    for slot in &hours.slots {
        let range_end = u64::from(slot.end.num_seconds_from_midnight());
        let mut candidate = u64::from(slot.start.num_seconds_from_midnight());

        while candidate + duration_secs <= range_end {
            // Both bounds are within the day here.
            let (start, end) = (candidate as u32, (candidate + duration_secs) as u32);
            let too_soon = candidate < earliest_secs;
            let taken = query.busy.iter().any(|b| b.overlaps(start, end));

            if !too_soon && !taken {
                if let Some(time) = NaiveTime::from_num_seconds_from_midnight_opt(start, 0) {
                    starts.insert(time);
                }
            }
            candidate += step_secs;
        }
    }

    starts.into_iter().collect()
}

/// Returns true when `start` is one of the bookable start times.
pub fn is_slot_available(
    query: &SlotQuery<'_>,
    rules: &AvailabilityRules,
    start: NaiveTime,
) -> bool {
    available_slots(query, rules).contains(&start)
}

/// Dates in `range` that offer at least one bookable start time.
///
/// `hours` may contain rows outside the range or for several dates; the row
/// matching each date is used. `busy` maps a date to its busy intervals.
pub fn available_days(
    range: DateRange,
    hours: &[OpeningHours],
    busy: &HashMap<NaiveDate, Vec<BusyInterval>>,
    duration_minutes: u32,
    now: NaiveDateTime,
    rules: &AvailabilityRules,
) -> Vec<NaiveDate> {
    let by_date: HashMap<NaiveDate, &OpeningHours> = hours.iter().map(|h| (h.date, h)).collect();

    range
        .days()
        .filter(|date| {
            let query = SlotQuery {
                date: *date,
                hours: by_date.get(date).copied(),
                busy: busy.get(date).map(Vec::as_slice).unwrap_or(&[]),
                duration_minutes,
                now,
            };
            !available_slots(&query, rules).is_empty()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::TimeSlot;
    use uuid::Uuid;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 4).unwrap()
    }

    /// A moment well before `day()` so the lead time never applies.
    fn earlier() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn hours(slots: Vec<TimeSlot>) -> OpeningHours {
        OpeningHours::open(Uuid::new_v4(), day(), slots)
    }

    fn query<'a>(
        hours: Option<&'a OpeningHours>,
        busy: &'a [BusyInterval],
        duration_minutes: u32,
        now: NaiveDateTime,
    ) -> SlotQuery<'a> {
        SlotQuery {
            date: day(),
            hours,
            busy,
            duration_minutes,
            now,
        }
    }

    #[test]
    fn test_full_morning_on_15_minute_grid() {
        let h = hours(vec![TimeSlot::new(t(9, 0), t(10, 0))]);
        let slots = available_slots(
            &query(Some(&h), &[], 30, earlier()),
            &AvailabilityRules::default(),
        );
        assert_eq!(slots, vec![t(9, 0), t(9, 15), t(9, 30)]);
    }

    #[test]
    fn test_service_must_fit_inside_sub_range() {
        // 12:00-13:00 lunch break: a 60 minute service cannot start at 11:30.
        let h = hours(vec![
            TimeSlot::new(t(10, 0), t(12, 0)),
            TimeSlot::new(t(13, 0), t(14, 0)),
        ]);
        let slots = available_slots(
            &query(Some(&h), &[], 60, earlier()),
            &AvailabilityRules::default(),
        );
        assert_eq!(
            slots,
            vec![t(10, 0), t(10, 15), t(10, 30), t(10, 45), t(11, 0), t(13, 0)]
        );
    }

    #[test]
    fn test_no_hours_or_closed_day_has_no_slots() {
        let rules = AvailabilityRules::default();
        assert!(available_slots(&query(None, &[], 30, earlier()), &rules).is_empty());

        let mut h = hours(vec![TimeSlot::new(t(9, 0), t(18, 0))]);
        h.is_closed = true;
        assert!(available_slots(&query(Some(&h), &[], 30, earlier()), &rules).is_empty());
    }

    #[test]
    fn test_zero_duration_has_no_slots() {
        let h = hours(vec![TimeSlot::new(t(9, 0), t(18, 0))]);
        let slots = available_slots(
            &query(Some(&h), &[], 0, earlier()),
            &AvailabilityRules::default(),
        );
        assert!(slots.is_empty());
    }

    #[test]
    fn test_duration_longer_than_the_day_has_no_slots() {
        let h = hours(vec![TimeSlot::new(t(0, 0), t(23, 59))]);
        let rules = AvailabilityRules::default();

        for minutes in [24 * 60, 100_000_000, 1_073_741_854, u32::MAX] {
            let slots = available_slots(&query(Some(&h), &[], minutes, earlier()), &rules);
            assert!(slots.is_empty(), "{minutes} minutes");
        }
    }

    #[test]
    fn test_extreme_rules_do_not_overflow() {
        let h = hours(vec![TimeSlot::new(t(9, 0), t(12, 0))]);
        let rules = AvailabilityRules {
            step_minutes: u32::MAX,
            lead_minutes: u32::MAX,
        };

        let slots = available_slots(&query(Some(&h), &[], 30, earlier()), &rules);
        assert_eq!(slots, vec![t(9, 0)]);

        let now = day().and_hms_opt(8, 0, 0).unwrap();
        assert!(available_slots(&query(Some(&h), &[], 30, now), &rules).is_empty());
    }

    #[test]
    fn test_past_day_has_no_slots() {
        let h = hours(vec![TimeSlot::new(t(9, 0), t(18, 0))]);
        let later = NaiveDate::from_ymd_opt(2025, 3, 5)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let slots = available_slots(
            &query(Some(&h), &[], 30, later),
            &AvailabilityRules::default(),
        );
        assert!(slots.is_empty());
    }

    #[test]
    fn test_busy_intervals_are_skipped_but_touching_is_allowed() {
        let h = hours(vec![TimeSlot::new(t(9, 0), t(12, 0))]);
        let busy = [BusyInterval::new(t(10, 0), t(11, 0))];
        let slots = available_slots(
            &query(Some(&h), &busy, 60, earlier()),
            &AvailabilityRules::default(),
        );
        assert_eq!(slots, vec![t(9, 0), t(11, 0)]);
    }

    #[test]
    fn test_slots_never_overlap_busy_intervals() {
        let h = hours(vec![
            TimeSlot::new(t(9, 0), t(12, 30)),
            TimeSlot::new(t(14, 0), t(19, 0)),
        ]);
        let busy = [
            BusyInterval::new(t(9, 45), t(10, 30)),
            BusyInterval::new(t(11, 50), t(12, 10)),
            BusyInterval::new(t(15, 0), t(17, 15)),
        ];

        for duration in [15, 30, 45, 60, 90, 120] {
            let slots = available_slots(
                &query(Some(&h), &busy, duration, earlier()),
                &AvailabilityRules::default(),
            );
            for start in slots {
                let s = start.num_seconds_from_midnight();
                let e = s + duration * 60;
                assert!(
                    busy.iter().all(|b| !b.overlaps(s, e)),
                    "{start} (+{duration}m) overlaps a reservation"
                );
            }
        }
    }

    #[test]
    fn test_today_respects_lead_time() {
        let h = hours(vec![TimeSlot::new(t(9, 0), t(12, 0))]);
        let now = day().and_hms_opt(9, 40, 0).unwrap();
        let slots = available_slots(
            &query(Some(&h), &[], 30, now),
            &AvailabilityRules::default(),
        );

        assert_eq!(slots.first(), Some(&t(10, 15)));
        for start in &slots {
            let gap = start.signed_duration_since(now.time());
            assert!(gap >= chrono::Duration::minutes(30));
        }
    }

    #[test]
    fn test_lead_time_boundary_is_inclusive() {
        let h = hours(vec![TimeSlot::new(t(9, 0), t(12, 0))]);
        let now = day().and_hms_opt(9, 45, 0).unwrap();
        let slots = available_slots(
            &query(Some(&h), &[], 30, now),
            &AvailabilityRules::default(),
        );
        assert_eq!(slots.first(), Some(&t(10, 15)));

        let now = day().and_hms_opt(9, 45, 1).unwrap();
        let slots = available_slots(
            &query(Some(&h), &[], 30, now),
            &AvailabilityRules::default(),
        );
        assert_eq!(slots.first(), Some(&t(10, 30)));
    }

    #[test]
    fn test_late_evening_today_has_no_slots() {
        let h = hours(vec![TimeSlot::new(t(9, 0), t(19, 0))]);
        let now = day().and_hms_opt(23, 50, 0).unwrap();
        let slots = available_slots(
            &query(Some(&h), &[], 30, now),
            &AvailabilityRules::default(),
        );
        assert!(slots.is_empty());
    }

    #[test]
    fn test_custom_step() {
        let h = hours(vec![TimeSlot::new(t(9, 0), t(10, 0))]);
        let rules = AvailabilityRules {
            step_minutes: 30,
            lead_minutes: 30,
        };
        let slots = available_slots(&query(Some(&h), &[], 30, earlier()), &rules);
        assert_eq!(slots, vec![t(9, 0), t(9, 30)]);
    }

    #[test]
    fn test_overlapping_ranges_are_deduplicated() {
        let h = hours(vec![
            TimeSlot::new(t(9, 0), t(10, 0)),
            TimeSlot::new(t(9, 30), t(10, 30)),
        ]);
        let slots = available_slots(
            &query(Some(&h), &[], 30, earlier()),
            &AvailabilityRules::default(),
        );
        assert_eq!(slots, vec![t(9, 0), t(9, 15), t(9, 30), t(9, 45), t(10, 0)]);
    }

    #[test]
    fn test_is_slot_available() {
        let h = hours(vec![TimeSlot::new(t(9, 0), t(12, 0))]);
        let busy = [BusyInterval::new(t(10, 0), t(11, 0))];
        let q = query(Some(&h), &busy, 60, earlier());
        let rules = AvailabilityRules::default();

        assert!(is_slot_available(&q, &rules, t(9, 0)));
        assert!(!is_slot_available(&q, &rules, t(9, 30)));
        assert!(!is_slot_available(&q, &rules, t(9, 5)));
        assert!(is_slot_available(&q, &rules, t(11, 0)));
    }

    #[test]
    fn test_available_days() {
        let salon_id = Uuid::new_v4();
        let tue = day();
        let wed = tue.succ_opt().unwrap();
        let thu = wed.succ_opt().unwrap();

        let hours = vec![
            OpeningHours::open(salon_id, tue, vec![TimeSlot::new(t(9, 0), t(10, 0))]),
            OpeningHours::closed(salon_id, wed),
            OpeningHours::open(salon_id, thu, vec![TimeSlot::new(t(9, 0), t(10, 0))]),
        ];
        let mut busy = HashMap::new();
        busy.insert(thu, vec![BusyInterval::new(t(9, 0), t(10, 0))]);

        let range = DateRange::new(tue, thu.succ_opt().unwrap()).unwrap();
        let days = available_days(
            range,
            &hours,
            &busy,
            60,
            earlier(),
            &AvailabilityRules::default(),
        );
        assert_eq!(days, vec![tue]);
    }

    #[test]
    fn test_available_days_at_the_end_of_the_calendar() {
        let last = NaiveDate::MAX;
        let hours = vec![OpeningHours::open(
            Uuid::new_v4(),
            last,
            vec![TimeSlot::new(t(9, 0), t(10, 0))],
        )];

        let range = DateRange::starting_at(last, 28);
        let rules = AvailabilityRules::default();

        let days = available_days(range, &hours, &HashMap::new(), 30, earlier(), &rules);
        assert_eq!(days, vec![last]);

        let days = available_days(range, &hours, &HashMap::new(), u32::MAX, earlier(), &rules);
        assert!(days.is_empty());
    }
}
