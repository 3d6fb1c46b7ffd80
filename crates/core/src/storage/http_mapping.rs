//! Pure functions for mapping domain and repository errors to HTTP status codes.
//!
//! The server decides what to log and how to render the body; these functions
//! only pick the status.

use super::RepositoryError;
use crate::booking::BookingError;
use crate::catalog::CatalogError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `AlreadyExists` -> 409 (Conflict)
/// - `ConnectionFailed` -> 503 (Service Unavailable)
/// - `QueryFailed` -> 500 (Internal Server Error)
/// - `Serialization` -> 500 (Internal Server Error)
/// - `InvalidData` -> 400 (Bad Request)
///
/// # Examples
///
/// ```
/// use salonbook_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// let error = RepositoryError::NotFound {
///     entity_type: "Reservation",
///     id: "abc-123".to_string(),
/// };
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::AlreadyExists { .. } => 409,
        RepositoryError::ConnectionFailed(_) => 503,
        RepositoryError::QueryFailed(_) => 500,
        RepositoryError::Serialization(_) => 500,
        RepositoryError::InvalidData(_) => 400,
    }
}

/// Maps a [`CatalogError`] to an HTTP status code. Every variant is a client error.
pub fn catalog_error_to_status_code(_error: &CatalogError) -> u16 {
    400
}

/// Maps a [`BookingError`] to an HTTP status code.
///
/// Conflicts with the current state of the calendar or of a request's
/// lifecycle are 409; everything else is a 400 validation error.
pub fn booking_error_to_status_code(error: &BookingError) -> u16 {
    match error {
        BookingError::SlotUnavailable { .. }
        | BookingError::InvalidTransition { .. }
        | BookingError::NotReschedulable(_)
        | BookingError::InvalidRequestTransition { .. } => 409,
        BookingError::EmptyCustomerName
        | BookingError::InvalidEmail(_)
        | BookingError::NoPrestations
        | BookingError::DuplicatePrestation(_)
        | BookingError::InvalidRating(_)
        | BookingError::EmptyField { .. }
        | BookingError::FieldTooLong { .. }
        | BookingError::NotAFlashPrestation(_) => 400,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::{RequestStatus, ReservationStatus};
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn test_not_found_maps_to_404() {
        let error = RepositoryError::NotFound {
            entity_type: "Salon",
            id: "salon-123".to_string(),
        };
        assert_eq!(repository_error_to_status_code(&error), 404);
    }

    #[test]
    fn test_already_exists_maps_to_409() {
        let error = RepositoryError::AlreadyExists {
            entity_type: "User",
            id: "lea@example.com".to_string(),
        };
        assert_eq!(repository_error_to_status_code(&error), 409);
    }

    #[test]
    fn test_connection_failed_maps_to_503() {
        let error = RepositoryError::ConnectionFailed("database connection timeout".to_string());
        assert_eq!(repository_error_to_status_code(&error), 503);
    }

    #[test]
    fn test_query_and_serialization_map_to_500() {
        assert_eq!(
            repository_error_to_status_code(&RepositoryError::QueryFailed("syntax".to_string())),
            500
        );
        assert_eq!(
            repository_error_to_status_code(&RepositoryError::Serialization("json".to_string())),
            500
        );
    }

    #[test]
    fn test_invalid_data_maps_to_400() {
        let error = RepositoryError::InvalidData("date format is invalid".to_string());
        assert_eq!(repository_error_to_status_code(&error), 400);
    }

    #[test]
    fn test_catalog_errors_are_bad_requests() {
        assert_eq!(catalog_error_to_status_code(&CatalogError::ZeroDuration), 400);
        assert_eq!(
            catalog_error_to_status_code(&CatalogError::UnknownPrestation("x".to_string())),
            400
        );
    }

    #[test]
    fn test_booking_conflicts_map_to_409() {
        let slot = BookingError::SlotUnavailable {
            date: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
            start: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        };
        assert_eq!(booking_error_to_status_code(&slot), 409);

        let transition = BookingError::InvalidTransition {
            from: ReservationStatus::Completed,
            to: ReservationStatus::Pending,
        };
        assert_eq!(booking_error_to_status_code(&transition), 409);
        assert_eq!(
            booking_error_to_status_code(&BookingError::NotReschedulable(
                ReservationStatus::Cancelled
            )),
            409
        );

        let request = BookingError::InvalidRequestTransition {
            from: RequestStatus::Declined,
            to: RequestStatus::Accepted,
        };
        assert_eq!(booking_error_to_status_code(&request), 409);
    }

    #[test]
    fn test_booking_validation_maps_to_400() {
        assert_eq!(booking_error_to_status_code(&BookingError::NoPrestations), 400);
        assert_eq!(booking_error_to_status_code(&BookingError::InvalidRating(9)), 400);
        assert_eq!(
            booking_error_to_status_code(&BookingError::InvalidEmail("x".to_string())),
            400
        );
    }
}
