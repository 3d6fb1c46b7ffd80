mod booking;

pub use booking::{BookingForm, BookingQuery};
