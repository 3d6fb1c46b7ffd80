//! Customers, reservations, tattoo requests and reviews.

mod error;
mod operations;
mod requests;
mod types;

pub use error::BookingError;
pub use operations::{
    blocking_intervals, conflicting_reservations, normalize_email, validate_flash_request,
    validate_reservation_request, validate_review, validate_tattoo_request, validate_user,
};
pub use requests::{
    CreateFlashTattooRequest, CreateReservationRequest, CreateReviewRequest,
    CreateTattooRequest, CustomerDetails, RescheduleReservationRequest, UpdateRequestStatus,
    UpdateReservationStatus, UpdateReviewRequest,
};
pub use types::{
    FlashTattooRequest, RequestStatus, Reservation, ReservationStatus, Review, TattooRequest,
    User, UserRole,
};
