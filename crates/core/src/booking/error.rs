use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

use super::types::{RequestStatus, ReservationStatus};

/// Errors raised by the booking flow and customer requests.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("Customer name cannot be empty")]
    EmptyCustomerName,
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
    #[error("Select at least one prestation")]
    NoPrestations,
    #[error("Prestation {0} selected more than once")]
    DuplicatePrestation(String),
    #[error("The slot {date} {start} is no longer available")]
    SlotUnavailable { date: NaiveDate, start: NaiveTime },
    #[error("Cannot change reservation status from {from} to {to}")]
    InvalidTransition {
        from: ReservationStatus,
        to: ReservationStatus,
    },
    #[error("A {0} reservation cannot be moved")]
    NotReschedulable(ReservationStatus),
    #[error("Cannot change request status from {from} to {to}")]
    InvalidRequestTransition {
        from: RequestStatus,
        to: RequestStatus,
    },
    #[error("Rating must be between 1 and 5 (got {0})")]
    InvalidRating(u8),
    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },
    #[error("{field} too long (max {max} characters)")]
    FieldTooLong { field: &'static str, max: usize },
    #[error("Prestation {0} is not a flash tattoo")]
    NotAFlashPrestation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_error_display() {
        let error = BookingError::SlotUnavailable {
            date: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
            start: NaiveTime::from_hms_opt(10, 15, 0).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "The slot 2025-03-05 10:15:00 is no longer available"
        );

        let error = BookingError::InvalidTransition {
            from: ReservationStatus::Cancelled,
            to: ReservationStatus::Confirmed,
        };
        assert_eq!(
            error.to_string(),
            "Cannot change reservation status from cancelled to confirmed"
        );

        assert_eq!(
            BookingError::FieldTooLong {
                field: "Comment",
                max: 2000
            }
            .to_string(),
            "Comment too long (max 2000 characters)"
        );
    }
}
