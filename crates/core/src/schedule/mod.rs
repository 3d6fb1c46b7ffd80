//! Opening hours, bookable slot computation and salon week exclusivity.

mod availability;
mod error;
mod exclusivity;
mod operations;
mod requests;
mod types;

pub use availability::{available_days, available_slots, is_slot_available, SlotQuery};
pub use error::ScheduleError;
pub use exclusivity::{plan_week_closure, plan_week_exclusivity};
pub use operations::{normalize_slots, validate_opening_hours, week_dates};
pub use requests::{UpdateOpeningHoursRequest, UpsertOpeningHoursRequest};
pub use types::{AvailabilityRules, BusyInterval, OpeningHours, TimeSlot};
