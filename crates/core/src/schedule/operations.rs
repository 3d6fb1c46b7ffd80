use chrono::NaiveDate;

use super::error::ScheduleError;
use super::types::{OpeningHours, TimeSlot};
use crate::storage::DateRange;

const MAX_NOTE_LEN: usize = 500;

/// Sorts slots by start time so they can be checked for overlap.
pub fn normalize_slots(mut slots: Vec<TimeSlot>) -> Vec<TimeSlot> {
    slots.sort();
    slots
}

/// Validates an opening-hours row before it is stored.
///
/// Closed days carry no slots. Open days need at least one slot, every slot
/// must end after it starts, and consecutive slots may touch but not overlap.
pub fn validate_opening_hours(hours: &OpeningHours) -> Result<(), ScheduleError> {
    if let Some(note) = &hours.note {
        if note.chars().count() > MAX_NOTE_LEN {
            return Err(ScheduleError::NoteTooLong);
        }
    }

    if hours.is_closed {
        return Ok(());
    }

    if hours.slots.is_empty() {
        return Err(ScheduleError::NoSlots);
    }

    for slot in &hours.slots {
        if slot.end <= slot.start {
            return Err(ScheduleError::InvalidSlot {
                start: slot.start,
                end: slot.end,
            });
        }
    }

    for pair in hours.slots.windows(2) {
        if pair[1].start < pair[0].end {
            return Err(ScheduleError::OverlappingSlots {
                first_end: pair[0].end,
                second_start: pair[1].start,
            });
        }
    }

    Ok(())
}

/// The seven dates (Monday to Sunday) of the ISO week containing `date`.
pub fn week_dates(date: NaiveDate) -> Vec<NaiveDate> {
    DateRange::week(date).days().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveTime, Weekday};
    use uuid::Uuid;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()
    }

    #[test]
    fn test_normalize_slots_sorts() {
        let slots = normalize_slots(vec![
            TimeSlot::new(t(14, 0), t(18, 0)),
            TimeSlot::new(t(9, 0), t(12, 0)),
        ]);
        assert_eq!(slots[0].start, t(9, 0));
        assert_eq!(slots[1].start, t(14, 0));
    }

    #[test]
    fn test_validate_open_day_with_break() {
        let hours = OpeningHours::open(
            Uuid::new_v4(),
            date(),
            vec![
                TimeSlot::new(t(9, 0), t(12, 0)),
                TimeSlot::new(t(12, 0), t(13, 0)),
                TimeSlot::new(t(14, 0), t(18, 0)),
            ],
        );
        assert!(validate_opening_hours(&hours).is_ok());
    }

    #[test]
    fn test_validate_open_day_without_slots() {
        let hours = OpeningHours::open(Uuid::new_v4(), date(), vec![]);
        assert_eq!(validate_opening_hours(&hours), Err(ScheduleError::NoSlots));
    }

    #[test]
    fn test_validate_closed_day_without_slots() {
        let hours = OpeningHours::closed(Uuid::new_v4(), date());
        assert!(validate_opening_hours(&hours).is_ok());
    }

    #[test]
    fn test_validate_inverted_slot() {
        let hours = OpeningHours::open(
            Uuid::new_v4(),
            date(),
            vec![TimeSlot::new(t(12, 0), t(12, 0))],
        );
        assert!(matches!(
            validate_opening_hours(&hours),
            Err(ScheduleError::InvalidSlot { .. })
        ));
    }

    #[test]
    fn test_validate_overlapping_slots() {
        let hours = OpeningHours::open(
            Uuid::new_v4(),
            date(),
            vec![
                TimeSlot::new(t(9, 0), t(12, 30)),
                TimeSlot::new(t(12, 0), t(18, 0)),
            ],
        );
        assert_eq!(
            validate_opening_hours(&hours),
            Err(ScheduleError::OverlappingSlots {
                first_end: t(12, 30),
                second_start: t(12, 0),
            })
        );
    }

    #[test]
    fn test_validate_note_length() {
        let hours = OpeningHours::closed(Uuid::new_v4(), date()).with_note("x".repeat(501));
        assert_eq!(validate_opening_hours(&hours), Err(ScheduleError::NoteTooLong));
    }

    #[test]
    fn test_week_dates() {
        let dates = week_dates(date());
        assert_eq!(dates.len(), 7);
        assert_eq!(dates[0].weekday(), Weekday::Mon);
        assert_eq!(dates[6].weekday(), Weekday::Sun);
        assert!(dates.contains(&date()));
    }
}
