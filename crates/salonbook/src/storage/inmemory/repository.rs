//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use uuid::Uuid;

use salonbook_core::booking::{FlashTattooRequest, Reservation, Review, TattooRequest, User};
use salonbook_core::catalog::{Prestation, Salon, Service};
use salonbook_core::schedule::OpeningHours;
use salonbook_core::storage::{
    DateRange, FlashTattooRequestRepository, OpeningHoursRepository, PrestationRepository,
    RepositoryError, ReservationFilter, ReservationRepository, Result, ReviewRepository,
    SalonRepository, ServiceRepository, TattooRequestRepository, UserRepository,
};

type Table<T> = Arc<RwLock<HashMap<Uuid, T>>>;

/// In-memory storage backend.
///
/// Uses HashMaps wrapped in `Arc<RwLock<_>>` for thread-safe access.
/// Data is not persisted and will be lost when the repository is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    salons: Table<Salon>,
    services: Table<Service>,
    prestations: Table<Prestation>,
    opening_hours: Table<OpeningHours>,
    reservations: Table<Reservation>,
    users: Table<User>,
    tattoo_requests: Table<TattooRequest>,
    flash_requests: Table<FlashTattooRequest>,
    reviews: Table<Review>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

async fn insert_new<T: Clone>(table: &Table<T>, entity_type: &'static str, id: Uuid, value: &T) -> Result<()> {
    let mut rows = table.write().await;
    if rows.contains_key(&id) {
        return Err(RepositoryError::AlreadyExists {
            entity_type,
            id: id.to_string(),
        });
    }
    rows.insert(id, value.clone());
    Ok(())
}

async fn replace<T: Clone>(table: &Table<T>, entity_type: &'static str, id: Uuid, value: &T) -> Result<()> {
    let mut rows = table.write().await;
    if !rows.contains_key(&id) {
        return Err(RepositoryError::not_found(entity_type, id));
    }
    rows.insert(id, value.clone());
    Ok(())
}

async fn remove<T>(table: &Table<T>, entity_type: &'static str, id: Uuid) -> Result<()> {
    let mut rows = table.write().await;
    if rows.remove(&id).is_none() {
        return Err(RepositoryError::not_found(entity_type, id));
    }
    Ok(())
}

fn matches_filter(filter: &ReservationFilter, reservation: &Reservation) -> bool {
    filter.salon_id.is_none_or(|id| reservation.salon_id == id)
        && filter.user_id.is_none_or(|id| reservation.user_id == id)
        && filter
            .date_range
            .is_none_or(|range| range.contains(reservation.date))
        && filter.status.is_none_or(|status| reservation.status == status)
}

#[async_trait]
impl SalonRepository for InMemoryRepository {
    async fn list_salons(&self) -> Result<Vec<Salon>> {
        let salons = self.salons.read().await;
        let mut list: Vec<Salon> = salons.values().cloned().collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(list)
    }

    async fn get_salon(&self, id: Uuid) -> Result<Option<Salon>> {
        let salons = self.salons.read().await;
        Ok(salons.get(&id).cloned())
    }

    async fn create_salon(&self, salon: &Salon) -> Result<()> {
        {
            let salons = self.salons.read().await;
            if salons.values().any(|s| s.slug == salon.slug) {
                return Err(RepositoryError::AlreadyExists {
                    entity_type: "Salon",
                    id: salon.slug.clone(),
                });
            }
        }
        insert_new(&self.salons, "Salon", salon.id, salon).await
    }

    async fn update_salon(&self, salon: &Salon) -> Result<()> {
        {
            let salons = self.salons.read().await;
            if salons
                .values()
                .any(|s| s.slug == salon.slug && s.id != salon.id)
            {
                return Err(RepositoryError::AlreadyExists {
                    entity_type: "Salon",
                    id: salon.slug.clone(),
                });
            }
        }
        replace(&self.salons, "Salon", salon.id, salon).await
    }
}

#[async_trait]
impl ServiceRepository for InMemoryRepository {
    async fn list_services(&self) -> Result<Vec<Service>> {
        let services = self.services.read().await;
        let mut list: Vec<Service> = services.values().cloned().collect();
        list.sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.name.cmp(&b.name)));
        Ok(list)
    }

    async fn get_service(&self, id: Uuid) -> Result<Option<Service>> {
        let services = self.services.read().await;
        Ok(services.get(&id).cloned())
    }

    async fn create_service(&self, service: &Service) -> Result<()> {
        insert_new(&self.services, "Service", service.id, service).await
    }

    async fn update_service(&self, service: &Service) -> Result<()> {
        replace(&self.services, "Service", service.id, service).await
    }

    async fn delete_service(&self, id: Uuid) -> Result<()> {
        remove(&self.services, "Service", id).await?;
        let mut prestations = self.prestations.write().await;
        prestations.retain(|_, p| p.service_id != id);
        Ok(())
    }
}

#[async_trait]
impl PrestationRepository for InMemoryRepository {
    async fn list_prestations(&self) -> Result<Vec<Prestation>> {
        let prestations = self.prestations.read().await;
        let mut list: Vec<Prestation> = prestations.values().cloned().collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(list)
    }

    async fn list_prestations_by_service(&self, service_id: Uuid) -> Result<Vec<Prestation>> {
        let prestations = self.prestations.read().await;
        let mut list: Vec<Prestation> = prestations
            .values()
            .filter(|p| p.service_id == service_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| {
            a.price_cents
                .cmp(&b.price_cents)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(list)
    }

    async fn get_prestation(&self, id: Uuid) -> Result<Option<Prestation>> {
        let prestations = self.prestations.read().await;
        Ok(prestations.get(&id).cloned())
    }

    async fn get_prestations(&self, ids: &[Uuid]) -> Result<Vec<Prestation>> {
        let prestations = self.prestations.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| prestations.get(id).cloned())
            .collect())
    }

    async fn create_prestation(&self, prestation: &Prestation) -> Result<()> {
        if self.get_service(prestation.service_id).await?.is_none() {
            return Err(RepositoryError::InvalidData(format!(
                "Service {} does not exist",
                prestation.service_id
            )));
        }
        insert_new(&self.prestations, "Prestation", prestation.id, prestation).await
    }

    async fn update_prestation(&self, prestation: &Prestation) -> Result<()> {
        replace(&self.prestations, "Prestation", prestation.id, prestation).await
    }

    async fn delete_prestation(&self, id: Uuid) -> Result<()> {
        remove(&self.prestations, "Prestation", id).await
    }
}

#[async_trait]
impl OpeningHoursRepository for InMemoryRepository {
    async fn get_opening_hours(&self, id: Uuid) -> Result<Option<OpeningHours>> {
        let rows = self.opening_hours.read().await;
        Ok(rows.get(&id).cloned())
    }

    async fn get_opening_hours_for_day(
        &self,
        salon_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<OpeningHours>> {
        let rows = self.opening_hours.read().await;
        Ok(rows
            .values()
            .find(|h| h.salon_id == salon_id && h.date == date)
            .cloned())
    }

    async fn list_opening_hours(
        &self,
        salon_id: Option<Uuid>,
        date_range: DateRange,
    ) -> Result<Vec<OpeningHours>> {
        let rows = self.opening_hours.read().await;
        let mut list: Vec<OpeningHours> = rows
            .values()
            .filter(|h| salon_id.is_none_or(|id| h.salon_id == id))
            .filter(|h| date_range.contains(h.date))
            .cloned()
            .collect();
        list.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.salon_id.cmp(&b.salon_id)));
        Ok(list)
    }

    async fn upsert_opening_hours(&self, hours: &OpeningHours) -> Result<()> {
        let mut rows = self.opening_hours.write().await;
        // (salon_id, date) is the natural key; an existing row keeps its id.
        let existing = rows
            .values_mut()
            .find(|h| h.salon_id == hours.salon_id && h.date == hours.date);
        match existing {
            Some(row) => {
                row.is_closed = hours.is_closed;
                row.slots = hours.slots.clone();
                row.note = hours.note.clone();
                row.updated_at = hours.updated_at;
            }
            None => {
                rows.insert(hours.id, hours.clone());
            }
        }
        Ok(())
    }

    async fn delete_opening_hours(&self, id: Uuid) -> Result<()> {
        remove(&self.opening_hours, "OpeningHours", id).await
    }
}

#[async_trait]
impl ReservationRepository for InMemoryRepository {
    async fn get_reservation(&self, id: Uuid) -> Result<Option<Reservation>> {
        let reservations = self.reservations.read().await;
        Ok(reservations.get(&id).cloned())
    }

    async fn list_reservations(&self, filter: &ReservationFilter) -> Result<Vec<Reservation>> {
        let reservations = self.reservations.read().await;
        let mut list: Vec<Reservation> = reservations
            .values()
            .filter(|r| matches_filter(filter, r))
            .cloned()
            .collect();
        list.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.start_time.cmp(&b.start_time))
        });
        Ok(list)
    }

    async fn create_reservation(&self, reservation: &Reservation) -> Result<()> {
        insert_new(&self.reservations, "Reservation", reservation.id, reservation).await
    }

    async fn update_reservation(&self, reservation: &Reservation) -> Result<()> {
        replace(&self.reservations, "Reservation", reservation.id, reservation).await
    }

    async fn delete_reservation(&self, id: Uuid) -> Result<()> {
        remove(&self.reservations, "Reservation", id).await
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn list_users(&self) -> Result<Vec<User>> {
        let users = self.users.read().await;
        let mut list: Vec<User> = users.values().cloned().collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(list)
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|user| user.email == email).cloned())
    }

    async fn create_user(&self, user: &User) -> Result<()> {
        {
            let users = self.users.read().await;
            if users.values().any(|u| u.email == user.email) {
                return Err(RepositoryError::AlreadyExists {
                    entity_type: "User",
                    id: user.email.clone(),
                });
            }
        }
        insert_new(&self.users, "User", user.id, user).await
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        replace(&self.users, "User", user.id, user).await
    }
}

#[async_trait]
impl TattooRequestRepository for InMemoryRepository {
    async fn list_tattoo_requests(&self) -> Result<Vec<TattooRequest>> {
        let requests = self.tattoo_requests.read().await;
        let mut list: Vec<TattooRequest> = requests.values().cloned().collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }

    async fn get_tattoo_request(&self, id: Uuid) -> Result<Option<TattooRequest>> {
        let requests = self.tattoo_requests.read().await;
        Ok(requests.get(&id).cloned())
    }

    async fn create_tattoo_request(&self, request: &TattooRequest) -> Result<()> {
        insert_new(&self.tattoo_requests, "TattooRequest", request.id, request).await
    }

    async fn update_tattoo_request(&self, request: &TattooRequest) -> Result<()> {
        replace(&self.tattoo_requests, "TattooRequest", request.id, request).await
    }

    async fn delete_tattoo_request(&self, id: Uuid) -> Result<()> {
        remove(&self.tattoo_requests, "TattooRequest", id).await
    }
}

#[async_trait]
impl FlashTattooRequestRepository for InMemoryRepository {
    async fn list_flash_requests(&self) -> Result<Vec<FlashTattooRequest>> {
        let requests = self.flash_requests.read().await;
        let mut list: Vec<FlashTattooRequest> = requests.values().cloned().collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }

    async fn get_flash_request(&self, id: Uuid) -> Result<Option<FlashTattooRequest>> {
        let requests = self.flash_requests.read().await;
        Ok(requests.get(&id).cloned())
    }

    async fn create_flash_request(&self, request: &FlashTattooRequest) -> Result<()> {
        insert_new(&self.flash_requests, "FlashTattooRequest", request.id, request).await
    }

    async fn update_flash_request(&self, request: &FlashTattooRequest) -> Result<()> {
        replace(&self.flash_requests, "FlashTattooRequest", request.id, request).await
    }

    async fn delete_flash_request(&self, id: Uuid) -> Result<()> {
        remove(&self.flash_requests, "FlashTattooRequest", id).await
    }
}

#[async_trait]
impl ReviewRepository for InMemoryRepository {
    async fn list_reviews(&self, published_only: bool) -> Result<Vec<Review>> {
        let reviews = self.reviews.read().await;
        let mut list: Vec<Review> = reviews
            .values()
            .filter(|r| r.published || !published_only)
            .cloned()
            .collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }

    async fn get_review(&self, id: Uuid) -> Result<Option<Review>> {
        let reviews = self.reviews.read().await;
        Ok(reviews.get(&id).cloned())
    }

    async fn create_review(&self, review: &Review) -> Result<()> {
        insert_new(&self.reviews, "Review", review.id, review).await
    }

    async fn update_review(&self, review: &Review) -> Result<()> {
        replace(&self.reviews, "Review", review.id, review).await
    }

    async fn delete_review(&self, id: Uuid) -> Result<()> {
        remove(&self.reviews, "Review", id).await
    }
}
