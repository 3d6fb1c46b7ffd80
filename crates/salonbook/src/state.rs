//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. It uses repository trait objects for storage abstraction;
//! the backend is picked by feature flags (see `crate::storage`).

use std::sync::Arc;

use chrono::NaiveDateTime;
use tokio::sync::Mutex;

use salonbook_core::schedule::AvailabilityRules;
use salonbook_core::storage::{
    FlashTattooRequestRepository, OpeningHoursRepository, PrestationRepository,
    ReservationRepository, ReviewRepository, SalonRepository, ServiceRepository,
    TattooRequestRepository, UserRepository,
};

use crate::config::Config;

/// A storage backend implementing every repository trait.
pub trait Storage:
    SalonRepository
    + ServiceRepository
    + PrestationRepository
    + OpeningHoursRepository
    + ReservationRepository
    + UserRepository
    + TattooRequestRepository
    + FlashTattooRequestRepository
    + ReviewRepository
    + 'static
{
}

impl<T> Storage for T where
    T: SalonRepository
        + ServiceRepository
        + PrestationRepository
        + OpeningHoursRepository
        + ReservationRepository
        + UserRepository
        + TattooRequestRepository
        + FlashTattooRequestRepository
        + ReviewRepository
        + 'static
{
}

/// Shared application state.
///
/// This is cloned for each request handler and contains shared resources
/// including repository trait objects for database access.
#[derive(Clone)]
pub struct AppState {
    pub salon_repo: Arc<dyn SalonRepository>,
    pub service_repo: Arc<dyn ServiceRepository>,
    pub prestation_repo: Arc<dyn PrestationRepository>,
    pub opening_hours_repo: Arc<dyn OpeningHoursRepository>,
    pub reservation_repo: Arc<dyn ReservationRepository>,
    pub user_repo: Arc<dyn UserRepository>,
    pub tattoo_repo: Arc<dyn TattooRequestRepository>,
    pub flash_repo: Arc<dyn FlashTattooRequestRepository>,
    pub review_repo: Arc<dyn ReviewRepository>,

    /// Serializes the check-then-write sequences on the calendar: reservation
    /// creation, rescheduling and opening-hours changes.
    pub booking_lock: Arc<Mutex<()>>,
    /// Slot grid and lead time.
    pub rules: AvailabilityRules,
}

impl AppState {
    /// Creates a new AppState sharing one backend across every repository field.
    pub fn from_storage<S: Storage>(storage: Arc<S>, rules: AvailabilityRules) -> Self {
        Self {
            salon_repo: storage.clone(),
            service_repo: storage.clone(),
            prestation_repo: storage.clone(),
            opening_hours_repo: storage.clone(),
            reservation_repo: storage.clone(),
            user_repo: storage.clone(),
            tattoo_repo: storage.clone(),
            flash_repo: storage.clone(),
            review_repo: storage,
            booking_lock: Arc::new(Mutex::new(())),
            rules,
        }
    }

    /// Salon-local wall-clock time used for the lead-time rule.
    pub fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

// ============================================================================
// Factory functions for the storage backends
// ============================================================================

#[cfg(feature = "sqlite")]
mod sqlite_backend {
    use super::*;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let repo = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
            tracing::info!(path = %config.sqlite_path, "Opened SQLite database");

            Ok(Self::from_storage(repo, config.availability_rules()))
        }
    }
}

#[cfg(feature = "inmemory")]
mod inmemory_backend {
    use super::*;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            tracing::warn!("Using in-memory storage, data will be lost on restart");

            Ok(Self::from_storage(
                Arc::new(InMemoryRepository::new()),
                config.availability_rules(),
            ))
        }
    }
}

#[cfg(test)]
impl Default for AppState {
    /// Empty in-memory state with default availability rules.
    fn default() -> Self {
        Self::from_storage(
            Arc::new(crate::storage::InMemoryRepository::new()),
            AvailabilityRules::default(),
        )
    }
}
