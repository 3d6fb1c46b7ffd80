use chrono::{Datelike, Days, NaiveDate};
use uuid::Uuid;

use super::DateRangeError;
use crate::booking::ReservationStatus;

/// A date range with inclusive start and end dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a new date range, validating that start <= end.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::InvalidRange);
        }
        Ok(Self { start, end })
    }

    /// Creates a range and rejects it when it spans more than `max_days` days.
    pub fn bounded(
        start: NaiveDate,
        end: NaiveDate,
        max_days: i64,
    ) -> Result<Self, DateRangeError> {
        let range = Self::new(start, end)?;
        if range.len_days() > max_days {
            return Err(DateRangeError::TooLong { max_days });
        }
        Ok(range)
    }

    /// A single-day range.
    pub fn day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// The `days`-day range starting at `start`, cut short at the last
    /// representable date.
    pub fn starting_at(start: NaiveDate, days: u32) -> Self {
        let end = start
            .checked_add_days(Days::new(u64::from(days.saturating_sub(1))))
            .unwrap_or(NaiveDate::MAX);
        Self { start, end }
    }

    /// Creates a date range for the ISO week containing the given date.
    ///
    /// ISO weeks start on Monday and end on Sunday. Weeks at the edges of the
    /// calendar are clamped to the representable dates.
    pub fn week(date: NaiveDate) -> Self {
        let days_from_monday = u64::from(date.weekday().num_days_from_monday());
        let start = date
            .checked_sub_days(Days::new(days_from_monday))
            .unwrap_or(NaiveDate::MIN);
        let end = start.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX);

        Self { start, end }
    }

    /// Number of days in the range (a single day counts as 1).
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Returns true if `date` falls inside the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Iterates over every date in the range.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        std::iter::successors(Some(self.start), move |d| {
            d.succ_opt().filter(|next| *next <= end)
        })
    }
}

/// Filter for reservation listings. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationFilter {
    pub salon_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub date_range: Option<DateRange>,
    pub status: Option<ReservationStatus>,
}

impl ReservationFilter {
    /// Reservations of one salon on one day.
    pub fn salon_day(salon_id: Uuid, date: NaiveDate) -> Self {
        Self {
            salon_id: Some(salon_id),
            date_range: Some(DateRange::day(date)),
            ..Default::default()
        }
    }
}
