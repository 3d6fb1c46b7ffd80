use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::booking::{FlashTattooRequest, Reservation, Review, TattooRequest, User};
use crate::catalog::{Prestation, Salon, Service};
use crate::schedule::OpeningHours;

use super::{DateRange, ReservationFilter, Result};

/// Repository for salon operations.
#[async_trait]
pub trait SalonRepository: Send + Sync {
    /// Lists every salon ordered by name.
    async fn list_salons(&self) -> Result<Vec<Salon>>;

    /// Gets a salon by its ID.
    async fn get_salon(&self, id: Uuid) -> Result<Option<Salon>>;

    /// Creates a new salon. The slug must be unique.
    async fn create_salon(&self, salon: &Salon) -> Result<()>;

    /// Updates an existing salon.
    async fn update_salon(&self, salon: &Salon) -> Result<()>;
}

/// Repository for service categories.
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    /// Lists every service ordered by position, then name.
    async fn list_services(&self) -> Result<Vec<Service>>;

    /// Gets a service by its ID.
    async fn get_service(&self, id: Uuid) -> Result<Option<Service>>;

    /// Creates a new service.
    async fn create_service(&self, service: &Service) -> Result<()>;

    /// Updates an existing service.
    async fn update_service(&self, service: &Service) -> Result<()>;

    /// Deletes a service and its prestations.
    async fn delete_service(&self, id: Uuid) -> Result<()>;
}

/// Repository for prestations.
#[async_trait]
pub trait PrestationRepository: Send + Sync {
    /// Lists every prestation, active or not.
    async fn list_prestations(&self) -> Result<Vec<Prestation>>;

    /// Lists the prestations of one service.
    async fn list_prestations_by_service(&self, service_id: Uuid) -> Result<Vec<Prestation>>;

    /// Gets a prestation by its ID.
    async fn get_prestation(&self, id: Uuid) -> Result<Option<Prestation>>;

    /// Gets the prestations whose IDs are in `ids`. Unknown IDs are skipped.
    async fn get_prestations(&self, ids: &[Uuid]) -> Result<Vec<Prestation>>;

    /// Creates a new prestation.
    async fn create_prestation(&self, prestation: &Prestation) -> Result<()>;

    /// Updates an existing prestation.
    async fn update_prestation(&self, prestation: &Prestation) -> Result<()>;

    /// Deletes a prestation by its ID.
    async fn delete_prestation(&self, id: Uuid) -> Result<()>;
}

/// Repository for per-day opening hours.
#[async_trait]
pub trait OpeningHoursRepository: Send + Sync {
    /// Gets an opening-hours row by its ID.
    async fn get_opening_hours(&self, id: Uuid) -> Result<Option<OpeningHours>>;

    /// Gets the row of a salon for one date.
    async fn get_opening_hours_for_day(
        &self,
        salon_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<OpeningHours>>;

    /// Lists rows within a date range, for one salon or all of them, ordered by date.
    async fn list_opening_hours(
        &self,
        salon_id: Option<Uuid>,
        date_range: DateRange,
    ) -> Result<Vec<OpeningHours>>;

    /// Inserts the row, or replaces the existing row for the same salon and date.
    async fn upsert_opening_hours(&self, hours: &OpeningHours) -> Result<()>;

    /// Deletes a row by its ID.
    async fn delete_opening_hours(&self, id: Uuid) -> Result<()>;
}

/// Repository for reservations.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Gets a reservation by its ID.
    async fn get_reservation(&self, id: Uuid) -> Result<Option<Reservation>>;

    /// Lists reservations matching the filter, ordered by date and start time.
    async fn list_reservations(&self, filter: &ReservationFilter) -> Result<Vec<Reservation>>;

    /// Creates a new reservation.
    async fn create_reservation(&self, reservation: &Reservation) -> Result<()>;

    /// Updates an existing reservation.
    async fn update_reservation(&self, reservation: &Reservation) -> Result<()>;

    /// Deletes a reservation by its ID.
    async fn delete_reservation(&self, id: Uuid) -> Result<()>;
}

/// Repository for user operations.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Lists every user ordered by name.
    async fn list_users(&self) -> Result<Vec<User>>;

    /// Gets a user by their ID.
    async fn get_user(&self, id: Uuid) -> Result<Option<User>>;

    /// Gets a user by their (normalized) email address.
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Creates a new user. The email must be unique.
    async fn create_user(&self, user: &User) -> Result<()>;

    /// Updates an existing user.
    async fn update_user(&self, user: &User) -> Result<()>;
}

/// Repository for custom tattoo requests.
#[async_trait]
pub trait TattooRequestRepository: Send + Sync {
    /// Lists every request, newest first.
    async fn list_tattoo_requests(&self) -> Result<Vec<TattooRequest>>;

    /// Gets a request by its ID.
    async fn get_tattoo_request(&self, id: Uuid) -> Result<Option<TattooRequest>>;

    /// Creates a new request.
    async fn create_tattoo_request(&self, request: &TattooRequest) -> Result<()>;

    /// Updates an existing request.
    async fn update_tattoo_request(&self, request: &TattooRequest) -> Result<()>;

    /// Deletes a request by its ID.
    async fn delete_tattoo_request(&self, id: Uuid) -> Result<()>;
}

/// Repository for flash tattoo requests.
#[async_trait]
pub trait FlashTattooRequestRepository: Send + Sync {
    /// Lists every request, newest first.
    async fn list_flash_requests(&self) -> Result<Vec<FlashTattooRequest>>;

    /// Gets a request by its ID.
    async fn get_flash_request(&self, id: Uuid) -> Result<Option<FlashTattooRequest>>;

    /// Creates a new request.
    async fn create_flash_request(&self, request: &FlashTattooRequest) -> Result<()>;

    /// Updates an existing request.
    async fn update_flash_request(&self, request: &FlashTattooRequest) -> Result<()>;

    /// Deletes a request by its ID.
    async fn delete_flash_request(&self, id: Uuid) -> Result<()>;
}

/// Repository for customer reviews.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Lists reviews, newest first. `published_only` hides unmoderated ones.
    async fn list_reviews(&self, published_only: bool) -> Result<Vec<Review>>;

    /// Gets a review by its ID.
    async fn get_review(&self, id: Uuid) -> Result<Option<Review>>;

    /// Creates a new review.
    async fn create_review(&self, review: &Review) -> Result<()>;

    /// Updates an existing review.
    async fn update_review(&self, review: &Review) -> Result<()>;

    /// Deletes a review by its ID.
    async fn delete_review(&self, id: Uuid) -> Result<()>;
}
