//! API request types for opening hours administration.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::operations::normalize_slots;
use super::types::{OpeningHours, TimeSlot};

/// Request payload for creating or replacing the hours of a salon day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertOpeningHoursRequest {
    pub salon_id: Uuid,
    pub date: NaiveDate,
    #[serde(default)]
    pub is_closed: bool,
    #[serde(default)]
    pub slots: Vec<TimeSlot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl UpsertOpeningHoursRequest {
    /// Create a request opening the day with the given slots.
    pub fn open(salon_id: Uuid, date: NaiveDate, slots: Vec<TimeSlot>) -> Self {
        Self {
            salon_id,
            date,
            is_closed: false,
            slots,
            note: None,
        }
    }

    /// Create a request closing the day.
    pub fn closed(salon_id: Uuid, date: NaiveDate) -> Self {
        Self {
            salon_id,
            date,
            is_closed: true,
            slots: Vec::new(),
            note: None,
        }
    }

    /// Convert into a row, reusing `existing` (same salon and date) when present.
    ///
    /// Slots are sorted; a closed day drops its slots.
    pub fn into_opening_hours(self, existing: Option<OpeningHours>) -> OpeningHours {
        let slots = if self.is_closed {
            Vec::new()
        } else {
            normalize_slots(self.slots)
        };

        match existing {
            Some(mut row) => {
                row.is_closed = self.is_closed;
                row.slots = slots;
                row.note = self.note;
                row.updated_at = Utc::now();
                row
            }
            None => {
                let mut row = OpeningHours::open(self.salon_id, self.date, slots);
                row.is_closed = self.is_closed;
                row.note = self.note;
                row
            }
        }
    }
}

/// Request payload for updating an existing opening-hours row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateOpeningHoursRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_closed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slots: Option<Vec<TimeSlot>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl UpdateOpeningHoursRequest {
    /// Apply updates to an existing row.
    pub fn apply_to(self, hours: &mut OpeningHours) {
        if let Some(is_closed) = self.is_closed {
            hours.is_closed = is_closed;
        }
        if let Some(slots) = self.slots {
            hours.slots = normalize_slots(slots);
        }
        if let Some(note) = self.note {
            hours.note = Some(note);
        }
        if hours.is_closed {
            hours.slots.clear();
        }
        hours.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()
    }

    #[test]
    fn test_upsert_parses_hhmm_slots() {
        let json = format!(
            r#"{{"salon_id":"{}","date":"2025-03-05","slots":[{{"start":"14:00","end":"18:00"}},{{"start":"09:00","end":"12:00"}}]}}"#,
            Uuid::nil()
        );
        let request: UpsertOpeningHoursRequest = serde_json::from_str(&json).unwrap();
        let row = request.into_opening_hours(None);

        assert!(!row.is_closed);
        assert_eq!(row.slots[0], TimeSlot::new(t(9, 0), t(12, 0)));
        assert_eq!(row.slots[1], TimeSlot::new(t(14, 0), t(18, 0)));
    }

    #[test]
    fn test_upsert_reuses_existing_row() {
        let salon_id = Uuid::new_v4();
        let existing = OpeningHours::closed(salon_id, date());
        let request =
            UpsertOpeningHoursRequest::open(salon_id, date(), vec![TimeSlot::new(t(9, 0), t(17, 0))]);

        let row = request.into_opening_hours(Some(existing.clone()));
        assert_eq!(row.id, existing.id);
        assert!(!row.is_closed);
        assert_eq!(row.slots.len(), 1);
    }

    #[test]
    fn test_closed_upsert_drops_slots() {
        let mut request = UpsertOpeningHoursRequest::closed(Uuid::new_v4(), date());
        request.slots = vec![TimeSlot::new(t(9, 0), t(17, 0))];
        let row = request.into_opening_hours(None);
        assert!(row.is_closed);
        assert!(row.slots.is_empty());
    }

    #[test]
    fn test_update_closing_clears_slots() {
        let mut row = OpeningHours::open(
            Uuid::new_v4(),
            date(),
            vec![TimeSlot::new(t(9, 0), t(17, 0))],
        );
        UpdateOpeningHoursRequest {
            is_closed: Some(true),
            note: Some("Holiday".to_string()),
            ..Default::default()
        }
        .apply_to(&mut row);

        assert!(row.is_closed);
        assert!(row.slots.is_empty());
        assert_eq!(row.note.as_deref(), Some("Holiday"));
    }
}
