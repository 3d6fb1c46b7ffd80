mod error;
mod http_mapping;
mod traits;
mod types;

pub use error::{DateRangeError, RepositoryError, Result};
pub use http_mapping::{
    booking_error_to_status_code, catalog_error_to_status_code, repository_error_to_status_code,
};
pub use traits::{
    FlashTattooRequestRepository, OpeningHoursRepository, PrestationRepository,
    ReservationRepository, ReviewRepository, SalonRepository, ServiceRepository,
    TattooRequestRepository, UserRepository,
};
pub use types::{DateRange, ReservationFilter};
