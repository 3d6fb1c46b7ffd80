//! Week exclusivity between salons.
//!
//! The salons share their staff, so only one of them can be open during a
//! given ISO week. Opening a day in one salon closes the whole week everywhere
//! else. The functions here only plan the rows to write.

use chrono::NaiveDate;
use uuid::Uuid;

use super::operations::week_dates;
use super::types::OpeningHours;

/// Rows to upsert so that `salon_id` is closed for the whole week of `date`.
///
/// `existing` holds the salon's rows for that week (other rows are ignored).
/// Rows already closed are left untouched; open rows are closed; missing days
/// get a new closed row.
pub fn plan_week_closure(
    salon_id: Uuid,
    date: NaiveDate,
    existing: &[OpeningHours],
) -> Vec<OpeningHours> {
    week_dates(date)
        .into_iter()
        .filter_map(|day| {
            match existing
                .iter()
                .find(|h| h.salon_id == salon_id && h.date == day)
            {
                Some(row) if row.is_closed => None,
                Some(row) => {
                    let mut row = row.clone();
                    row.close();
                    Some(row)
                }
                None => Some(OpeningHours::closed(salon_id, day)),
            }
        })
        .collect()
}

/// Rows to upsert after `opened_salon` opens a day in the week of `date`.
///
/// Every salon in `salons` other than `opened_salon` is closed for that week.
/// `existing` holds the week's rows of those salons.
pub fn plan_week_exclusivity(
    opened_salon: Uuid,
    date: NaiveDate,
    salons: &[Uuid],
    existing: &[OpeningHours],
) -> Vec<OpeningHours> {
    salons
        .iter()
        .filter(|id| **id != opened_salon)
        .flat_map(|id| plan_week_closure(*id, date, existing))
        .collect()
}
