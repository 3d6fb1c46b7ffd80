use chrono::NaiveTime;
use thiserror::Error;

/// Errors that can occur when validating opening hours.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("An open day needs at least one time slot")]
    NoSlots,
    #[error("Time slot must end after it starts ({start} - {end})")]
    InvalidSlot { start: NaiveTime, end: NaiveTime },
    #[error("Time slots overlap ({first_end} is after {second_start})")]
    OverlappingSlots {
        first_end: NaiveTime,
        second_start: NaiveTime,
    },
    #[error("Note too long (max 500 characters)")]
    NoteTooLong,
}
