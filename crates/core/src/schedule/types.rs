use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::serde::hhmm;

/// One open sub-range of a day, e.g. 09:00–12:30 before a lunch break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeSlot {
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

impl TimeSlot {
    /// Creates a slot from start and end times.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Creates a slot from `(hour, minute)` pairs.
    ///
    /// Returns None if either pair is not a valid time of day.
    pub fn from_hm(start: (u32, u32), end: (u32, u32)) -> Option<Self> {
        Some(Self {
            start: NaiveTime::from_hms_opt(start.0, start.1, 0)?,
            end: NaiveTime::from_hms_opt(end.0, end.1, 0)?,
        })
    }

    /// Length of the slot in minutes (0 when the slot is inverted).
    pub fn minutes(&self) -> u32 {
        minutes_of_day(self.end).saturating_sub(minutes_of_day(self.start))
    }
}

/// Opening state of one salon on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningHours {
    pub id: Uuid,
    pub salon_id: Uuid,
    pub date: NaiveDate,
    pub is_closed: bool,
    /// Open sub-ranges, sorted and non-overlapping. Empty when closed.
    pub slots: Vec<TimeSlot>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OpeningHours {
    /// Creates an open day with the given slots.
    pub fn open(salon_id: Uuid, date: NaiveDate, slots: Vec<TimeSlot>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            salon_id,
            date,
            is_closed: false,
            slots,
            note: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Creates a closed day.
    pub fn closed(salon_id: Uuid, date: NaiveDate) -> Self {
        let mut hours = Self::open(salon_id, date, Vec::new());
        hours.is_closed = true;
        hours
    }

    /// Sets the note shown on the public pages.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Marks the day closed and drops its slots.
    pub fn close(&mut self) {
        self.is_closed = true;
        self.slots.clear();
        self.updated_at = Utc::now();
    }

    /// Returns true when the salon accepts bookings on this day.
    pub fn is_open(&self) -> bool {
        !self.is_closed && !self.slots.is_empty()
    }

    /// Total open minutes across all slots.
    pub fn open_minutes(&self) -> u32 {
        if self.is_closed {
            return 0;
        }
        self.slots.iter().map(TimeSlot::minutes).sum()
    }
}

/// A time range already taken by a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusyInterval {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl BusyInterval {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Half-open overlap test in seconds of day: touching ranges do not overlap.
    pub fn overlaps(&self, start_secs: u32, end_secs: u32) -> bool {
        let busy_start = self.start.num_seconds_from_midnight();
        let busy_end = self.end.num_seconds_from_midnight();
        start_secs < busy_end && busy_start < end_secs
    }
}

/// Tunables for the slot scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityRules {
    /// Distance between two candidate start times.
    pub step_minutes: u32,
    /// Minimum distance between now and a slot offered for today.
    pub lead_minutes: u32,
}

impl Default for AvailabilityRules {
    fn default() -> Self {
        Self {
            step_minutes: 15,
            lead_minutes: 30,
        }
    }
}

pub(crate) fn minutes_of_day(time: NaiveTime) -> u32 {
    time.num_seconds_from_midnight() / 60
}
