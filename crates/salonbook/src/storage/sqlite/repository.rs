//! SQLite repository implementation.
//!
//! Implements the repository traits from `salonbook_core::storage` using SQLite.

use async_trait::async_trait;
use chrono::NaiveDate;
use rusqlite::{params, Row};
use tokio_rusqlite::Connection;
use uuid::Uuid;

use salonbook_core::booking::{FlashTattooRequest, Reservation, Review, TattooRequest, User};
use salonbook_core::catalog::{Prestation, Salon, Service};
use salonbook_core::schedule::OpeningHours;
use salonbook_core::storage::{
    DateRange, FlashTattooRequestRepository, OpeningHoursRepository, PrestationRepository,
    RepositoryError, ReservationFilter, ReservationRepository, Result, ReviewRepository,
    SalonRepository, ServiceRepository, TattooRequestRepository, UserRepository,
};

use super::conversions::{
    format_date, format_datetime, format_time, row_to_flash_request, row_to_opening_hours,
    row_to_prestation, row_to_reservation, row_to_review, row_to_salon, row_to_service,
    row_to_tattoo_request, row_to_user, to_json_column,
};
use super::error::{map_tokio_rusqlite_error, map_tokio_rusqlite_error_with_id};
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// Turns "zero rows affected" into `QueryReturnedNoRows` so it maps to NotFound.
fn expect_affected(rows: usize) -> std::result::Result<(), tokio_rusqlite::Error> {
    if rows == 0 {
        Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
    } else {
        Ok(())
    }
}

type RowMapper<T> = fn(&Row) -> rusqlite::Result<T>;

/// SQLite-based repository implementation.
///
/// Provides async access to SQLite storage for all entity types.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    #[cfg_attr(not(test), allow(dead_code))]
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::PRAGMAS).map_err(wrap_err)?;
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    /// Runs a single-row SELECT keyed by id.
    async fn fetch_one<T: Send + 'static>(
        &self,
        sql: &'static str,
        id: Uuid,
        mapper: RowMapper<T>,
        entity_type: &'static str,
    ) -> Result<Option<T>> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(sql).map_err(wrap_err)?;
                match stmt.query_row([&id_str], mapper) {
                    Ok(value) => Ok(Some(value)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, entity_type, id.to_string()))
    }

    /// Runs a parameterless SELECT returning many rows.
    async fn fetch_all<T: Send + 'static>(
        &self,
        sql: &'static str,
        mapper: RowMapper<T>,
        entity_type: &'static str,
    ) -> Result<Vec<T>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(sql).map_err(wrap_err)?;
                let rows = stmt.query_map([], mapper).map_err(wrap_err)?;

                let mut values = Vec::new();
                for row_result in rows {
                    values.push(row_result.map_err(wrap_err)?);
                }
                Ok(values)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, entity_type))
    }

    /// Runs a DELETE keyed by id; a missing row is NotFound.
    async fn delete_by_id(&self, sql: &'static str, id: Uuid, entity_type: &'static str) -> Result<()> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let rows = conn.execute(sql, [&id_str]).map_err(wrap_err)?;
                expect_affected(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, entity_type, id.to_string()))
    }
}

// ============================================================================
// SalonRepository implementation
// ============================================================================

#[async_trait]
impl SalonRepository for SqliteRepository {
    async fn list_salons(&self) -> Result<Vec<Salon>> {
        self.fetch_all(schema::SELECT_SALONS, row_to_salon, "Salon")
            .await
    }

    async fn get_salon(&self, id: Uuid) -> Result<Option<Salon>> {
        self.fetch_one(schema::SELECT_SALON_BY_ID, id, row_to_salon, "Salon")
            .await
    }

    async fn create_salon(&self, salon: &Salon) -> Result<()> {
        let salon = salon.clone();
        let slug = salon.slug.clone();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_SALON,
                    params![
                        salon.id.to_string(),
                        salon.name,
                        salon.slug,
                        salon.address,
                        salon.phone,
                        format_datetime(&salon.created_at),
                        format_datetime(&salon.updated_at)
                    ],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Salon", slug))
    }

    async fn update_salon(&self, salon: &Salon) -> Result<()> {
        let salon = salon.clone();
        let salon_id = salon.id.to_string();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_SALON,
                        params![
                            salon.id.to_string(),
                            salon.name,
                            salon.slug,
                            salon.address,
                            salon.phone,
                            format_datetime(&salon.updated_at)
                        ],
                    )
                    .map_err(wrap_err)?;
                expect_affected(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Salon", salon_id))
    }
}

// ============================================================================
// ServiceRepository implementation
// ============================================================================

#[async_trait]
impl ServiceRepository for SqliteRepository {
    async fn list_services(&self) -> Result<Vec<Service>> {
        self.fetch_all(schema::SELECT_SERVICES, row_to_service, "Service")
            .await
    }

    async fn get_service(&self, id: Uuid) -> Result<Option<Service>> {
        self.fetch_one(schema::SELECT_SERVICE_BY_ID, id, row_to_service, "Service")
            .await
    }

    async fn create_service(&self, service: &Service) -> Result<()> {
        let service = service.clone();
        let service_id = service.id.to_string();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_SERVICE,
                    params![
                        service.id.to_string(),
                        service.name,
                        service.description,
                        service.kind.as_str(),
                        service.position,
                        format_datetime(&service.created_at),
                        format_datetime(&service.updated_at)
                    ],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Service", service_id))
    }

    async fn update_service(&self, service: &Service) -> Result<()> {
        let service = service.clone();
        let service_id = service.id.to_string();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_SERVICE,
                        params![
                            service.id.to_string(),
                            service.name,
                            service.description,
                            service.kind.as_str(),
                            service.position,
                            format_datetime(&service.updated_at)
                        ],
                    )
                    .map_err(wrap_err)?;
                expect_affected(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Service", service_id))
    }

    async fn delete_service(&self, id: Uuid) -> Result<()> {
        // Prestations go with it (ON DELETE CASCADE).
        self.delete_by_id(schema::DELETE_SERVICE, id, "Service")
            .await
    }
}

// ============================================================================
// PrestationRepository implementation
// ============================================================================

#[async_trait]
impl PrestationRepository for SqliteRepository {
    async fn list_prestations(&self) -> Result<Vec<Prestation>> {
        self.fetch_all(schema::SELECT_PRESTATIONS, row_to_prestation, "Prestation")
            .await
    }

    async fn list_prestations_by_service(&self, service_id: Uuid) -> Result<Vec<Prestation>> {
        let service_id_str = service_id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_PRESTATIONS_BY_SERVICE)
                    .map_err(wrap_err)?;
                let rows = stmt
                    .query_map([&service_id_str], row_to_prestation)
                    .map_err(wrap_err)?;

                let mut prestations = Vec::new();
                for row_result in rows {
                    prestations.push(row_result.map_err(wrap_err)?);
                }
                Ok(prestations)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Prestation"))
    }

    async fn get_prestation(&self, id: Uuid) -> Result<Option<Prestation>> {
        self.fetch_one(
            schema::SELECT_PRESTATION_BY_ID,
            id,
            row_to_prestation,
            "Prestation",
        )
        .await
    }

    async fn get_prestations(&self, ids: &[Uuid]) -> Result<Vec<Prestation>> {
        let ids: Vec<String> = ids.iter().map(Uuid::to_string).collect();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_PRESTATION_BY_ID)
                    .map_err(wrap_err)?;

                let mut prestations = Vec::with_capacity(ids.len());
                for id in &ids {
                    match stmt.query_row([id], row_to_prestation) {
                        Ok(prestation) => prestations.push(prestation),
                        Err(rusqlite::Error::QueryReturnedNoRows) => {}
                        Err(e) => return Err(wrap_err(e)),
                    }
                }
                Ok(prestations)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Prestation"))
    }

    async fn create_prestation(&self, prestation: &Prestation) -> Result<()> {
        let prestation = prestation.clone();
        let prestation_id = prestation.id.to_string();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_PRESTATION,
                    params![
                        prestation.id.to_string(),
                        prestation.service_id.to_string(),
                        prestation.name,
                        prestation.description,
                        prestation.price_cents,
                        prestation.duration_minutes,
                        prestation.active,
                        prestation.image_url,
                        format_datetime(&prestation.created_at),
                        format_datetime(&prestation.updated_at)
                    ],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Prestation", prestation_id))
    }

    async fn update_prestation(&self, prestation: &Prestation) -> Result<()> {
        let prestation = prestation.clone();
        let prestation_id = prestation.id.to_string();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_PRESTATION,
                        params![
                            prestation.id.to_string(),
                            prestation.service_id.to_string(),
                            prestation.name,
                            prestation.description,
                            prestation.price_cents,
                            prestation.duration_minutes,
                            prestation.active,
                            prestation.image_url,
                            format_datetime(&prestation.updated_at)
                        ],
                    )
                    .map_err(wrap_err)?;
                expect_affected(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Prestation", prestation_id))
    }

    async fn delete_prestation(&self, id: Uuid) -> Result<()> {
        self.delete_by_id(schema::DELETE_PRESTATION, id, "Prestation")
            .await
    }
}

// ============================================================================
// OpeningHoursRepository implementation
// ============================================================================

#[async_trait]
impl OpeningHoursRepository for SqliteRepository {
    async fn get_opening_hours(&self, id: Uuid) -> Result<Option<OpeningHours>> {
        self.fetch_one(
            schema::SELECT_OPENING_HOURS_BY_ID,
            id,
            row_to_opening_hours,
            "OpeningHours",
        )
        .await
    }

    async fn get_opening_hours_for_day(
        &self,
        salon_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<OpeningHours>> {
        let salon_id_str = salon_id.to_string();
        let date_str = format_date(&date);

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_OPENING_HOURS_FOR_DAY)
                    .map_err(wrap_err)?;
                match stmt.query_row([&salon_id_str, &date_str], row_to_opening_hours) {
                    Ok(hours) => Ok(Some(hours)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "OpeningHours"))
    }

    async fn list_opening_hours(
        &self,
        salon_id: Option<Uuid>,
        date_range: DateRange,
    ) -> Result<Vec<OpeningHours>> {
        let salon_id_str = salon_id.map(|id| id.to_string());
        let start_str = format_date(&date_range.start);
        let end_str = format_date(&date_range.end);

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_OPENING_HOURS_IN_RANGE)
                    .map_err(wrap_err)?;
                let rows = stmt
                    .query_map(
                        params![salon_id_str, start_str, end_str],
                        row_to_opening_hours,
                    )
                    .map_err(wrap_err)?;

                let mut hours = Vec::new();
                for row_result in rows {
                    hours.push(row_result.map_err(wrap_err)?);
                }
                Ok(hours)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "OpeningHours"))
    }

    async fn upsert_opening_hours(&self, hours: &OpeningHours) -> Result<()> {
        let hours = hours.clone();
        let slots_json = to_json_column(&hours.slots)?;
        let hours_id = hours.id.to_string();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::UPSERT_OPENING_HOURS,
                    params![
                        hours.id.to_string(),
                        hours.salon_id.to_string(),
                        format_date(&hours.date),
                        hours.is_closed,
                        slots_json,
                        hours.note,
                        format_datetime(&hours.created_at),
                        format_datetime(&hours.updated_at)
                    ],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "OpeningHours", hours_id))
    }

    async fn delete_opening_hours(&self, id: Uuid) -> Result<()> {
        self.delete_by_id(schema::DELETE_OPENING_HOURS, id, "OpeningHours")
            .await
    }
}

// ============================================================================
// ReservationRepository implementation
// ============================================================================

#[async_trait]
impl ReservationRepository for SqliteRepository {
    async fn get_reservation(&self, id: Uuid) -> Result<Option<Reservation>> {
        self.fetch_one(
            schema::SELECT_RESERVATION_BY_ID,
            id,
            row_to_reservation,
            "Reservation",
        )
        .await
    }

    async fn list_reservations(&self, filter: &ReservationFilter) -> Result<Vec<Reservation>> {
        let salon_id = filter.salon_id.map(|id| id.to_string());
        let user_id = filter.user_id.map(|id| id.to_string());
        let start = filter.date_range.map(|r| format_date(&r.start));
        let end = filter.date_range.map(|r| format_date(&r.end));
        let status = filter.status.map(|s| s.as_str());

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_RESERVATIONS_FILTERED)
                    .map_err(wrap_err)?;
                let rows = stmt
                    .query_map(
                        params![salon_id, user_id, start, end, status],
                        row_to_reservation,
                    )
                    .map_err(wrap_err)?;

                let mut reservations = Vec::new();
                for row_result in rows {
                    reservations.push(row_result.map_err(wrap_err)?);
                }
                Ok(reservations)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Reservation"))
    }

    async fn create_reservation(&self, reservation: &Reservation) -> Result<()> {
        let reservation = reservation.clone();
        let prestation_ids = to_json_column(&reservation.prestation_ids)?;
        let reservation_id = reservation.id.to_string();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_RESERVATION,
                    params![
                        reservation.id.to_string(),
                        reservation.salon_id.to_string(),
                        reservation.user_id.to_string(),
                        prestation_ids,
                        format_date(&reservation.date),
                        format_time(&reservation.start_time),
                        format_time(&reservation.end_time),
                        reservation.status.as_str(),
                        reservation.total_price_cents,
                        reservation.notes,
                        format_datetime(&reservation.created_at),
                        format_datetime(&reservation.updated_at)
                    ],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Reservation", reservation_id))
    }

    async fn update_reservation(&self, reservation: &Reservation) -> Result<()> {
        let reservation = reservation.clone();
        let prestation_ids = to_json_column(&reservation.prestation_ids)?;
        let reservation_id = reservation.id.to_string();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_RESERVATION,
                        params![
                            reservation.id.to_string(),
                            prestation_ids,
                            format_date(&reservation.date),
                            format_time(&reservation.start_time),
                            format_time(&reservation.end_time),
                            reservation.status.as_str(),
                            reservation.total_price_cents,
                            reservation.notes,
                            format_datetime(&reservation.updated_at)
                        ],
                    )
                    .map_err(wrap_err)?;
                expect_affected(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Reservation", reservation_id))
    }

    async fn delete_reservation(&self, id: Uuid) -> Result<()> {
        self.delete_by_id(schema::DELETE_RESERVATION, id, "Reservation")
            .await
    }
}

// ============================================================================
// UserRepository implementation
// ============================================================================

#[async_trait]
impl UserRepository for SqliteRepository {
    async fn list_users(&self) -> Result<Vec<User>> {
        self.fetch_all(schema::SELECT_USERS, row_to_user, "User")
            .await
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        self.fetch_one(schema::SELECT_USER_BY_ID, id, row_to_user, "User")
            .await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let email = email.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_USER_BY_EMAIL)
                    .map_err(wrap_err)?;
                match stmt.query_row([&email], row_to_user) {
                    Ok(user) => Ok(Some(user)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User"))
    }

    async fn create_user(&self, user: &User) -> Result<()> {
        let user = user.clone();
        let email = user.email.clone();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_USER,
                    params![
                        user.id.to_string(),
                        user.name,
                        user.email,
                        user.phone,
                        user.role.as_str(),
                        format_datetime(&user.created_at),
                        format_datetime(&user.updated_at)
                    ],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "User", email))
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        let user = user.clone();
        let user_id = user.id.to_string();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_USER,
                        params![
                            user.id.to_string(),
                            user.name,
                            user.email,
                            user.phone,
                            user.role.as_str(),
                            format_datetime(&user.updated_at)
                        ],
                    )
                    .map_err(wrap_err)?;
                expect_affected(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "User", user_id))
    }
}

// ============================================================================
// TattooRequestRepository implementation
// ============================================================================

#[async_trait]
impl TattooRequestRepository for SqliteRepository {
    async fn list_tattoo_requests(&self) -> Result<Vec<TattooRequest>> {
        self.fetch_all(
            schema::SELECT_TATTOO_REQUESTS,
            row_to_tattoo_request,
            "TattooRequest",
        )
        .await
    }

    async fn get_tattoo_request(&self, id: Uuid) -> Result<Option<TattooRequest>> {
        self.fetch_one(
            schema::SELECT_TATTOO_REQUEST_BY_ID,
            id,
            row_to_tattoo_request,
            "TattooRequest",
        )
        .await
    }

    async fn create_tattoo_request(&self, request: &TattooRequest) -> Result<()> {
        let request = request.clone();
        let reference_urls = to_json_column(&request.reference_urls)?;
        let request_id = request.id.to_string();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_TATTOO_REQUEST,
                    params![
                        request.id.to_string(),
                        request.user_id.to_string(),
                        request.salon_id.map(|id| id.to_string()),
                        request.description,
                        request.placement,
                        request.size_cm,
                        request.style,
                        request.budget_cents,
                        reference_urls,
                        request.status.as_str(),
                        request.admin_notes,
                        format_datetime(&request.created_at),
                        format_datetime(&request.updated_at)
                    ],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "TattooRequest", request_id))
    }

    async fn update_tattoo_request(&self, request: &TattooRequest) -> Result<()> {
        let request = request.clone();
        let request_id = request.id.to_string();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_TATTOO_REQUEST,
                        params![
                            request.id.to_string(),
                            request.status.as_str(),
                            request.admin_notes,
                            format_datetime(&request.updated_at)
                        ],
                    )
                    .map_err(wrap_err)?;
                expect_affected(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "TattooRequest", request_id))
    }

    async fn delete_tattoo_request(&self, id: Uuid) -> Result<()> {
        self.delete_by_id(schema::DELETE_TATTOO_REQUEST, id, "TattooRequest")
            .await
    }
}

// ============================================================================
// FlashTattooRequestRepository implementation
// ============================================================================

#[async_trait]
impl FlashTattooRequestRepository for SqliteRepository {
    async fn list_flash_requests(&self) -> Result<Vec<FlashTattooRequest>> {
        self.fetch_all(
            schema::SELECT_FLASH_REQUESTS,
            row_to_flash_request,
            "FlashTattooRequest",
        )
        .await
    }

    async fn get_flash_request(&self, id: Uuid) -> Result<Option<FlashTattooRequest>> {
        self.fetch_one(
            schema::SELECT_FLASH_REQUEST_BY_ID,
            id,
            row_to_flash_request,
            "FlashTattooRequest",
        )
        .await
    }

    async fn create_flash_request(&self, request: &FlashTattooRequest) -> Result<()> {
        let request = request.clone();
        let request_id = request.id.to_string();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_FLASH_REQUEST,
                    params![
                        request.id.to_string(),
                        request.user_id.to_string(),
                        request.prestation_id.to_string(),
                        request.placement,
                        request.preferred_date.map(|d| format_date(&d)),
                        request.status.as_str(),
                        request.admin_notes,
                        format_datetime(&request.created_at),
                        format_datetime(&request.updated_at)
                    ],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "FlashTattooRequest", request_id))
    }

    async fn update_flash_request(&self, request: &FlashTattooRequest) -> Result<()> {
        let request = request.clone();
        let request_id = request.id.to_string();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_FLASH_REQUEST,
                        params![
                            request.id.to_string(),
                            request.status.as_str(),
                            request.admin_notes,
                            format_datetime(&request.updated_at)
                        ],
                    )
                    .map_err(wrap_err)?;
                expect_affected(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "FlashTattooRequest", request_id))
    }

    async fn delete_flash_request(&self, id: Uuid) -> Result<()> {
        self.delete_by_id(schema::DELETE_FLASH_REQUEST, id, "FlashTattooRequest")
            .await
    }
}

// ============================================================================
// ReviewRepository implementation
// ============================================================================

#[async_trait]
impl ReviewRepository for SqliteRepository {
    async fn list_reviews(&self, published_only: bool) -> Result<Vec<Review>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_REVIEWS).map_err(wrap_err)?;
                let rows = stmt
                    .query_map([published_only], row_to_review)
                    .map_err(wrap_err)?;

                let mut reviews = Vec::new();
                for row_result in rows {
                    reviews.push(row_result.map_err(wrap_err)?);
                }
                Ok(reviews)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Review"))
    }

    async fn get_review(&self, id: Uuid) -> Result<Option<Review>> {
        self.fetch_one(schema::SELECT_REVIEW_BY_ID, id, row_to_review, "Review")
            .await
    }

    async fn create_review(&self, review: &Review) -> Result<()> {
        let review = review.clone();
        let review_id = review.id.to_string();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_REVIEW,
                    params![
                        review.id.to_string(),
                        review.author_name,
                        review.rating,
                        review.comment,
                        review.published,
                        format_datetime(&review.created_at),
                        format_datetime(&review.updated_at)
                    ],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Review", review_id))
    }

    async fn update_review(&self, review: &Review) -> Result<()> {
        let review = review.clone();
        let review_id = review.id.to_string();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_REVIEW,
                        params![
                            review.id.to_string(),
                            review.comment,
                            review.published,
                            format_datetime(&review.updated_at)
                        ],
                    )
                    .map_err(wrap_err)?;
                expect_affected(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Review", review_id))
    }

    async fn delete_review(&self, id: Uuid) -> Result<()> {
        self.delete_by_id(schema::DELETE_REVIEW, id, "Review").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use salonbook_core::booking::ReservationStatus;
    use salonbook_core::catalog::ServiceKind;
    use salonbook_core::schedule::TimeSlot;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    async fn repo_with_salon() -> (SqliteRepository, Salon) {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        let salon = Salon::new("Atelier Nord", "atelier-nord", "12 rue des Lilas");
        repo.create_salon(&salon).await.unwrap();
        (repo, salon)
    }

    #[tokio::test]
    async fn test_salon_round_trip_and_unique_slug() {
        let (repo, salon) = repo_with_salon().await;

        assert_eq!(repo.get_salon(salon.id).await.unwrap(), Some(salon.clone()));

        let duplicate = Salon::new("Other", "atelier-nord", "3 rue B");
        let result = repo.create_salon(&duplicate).await;
        assert!(matches!(result, Err(RepositoryError::AlreadyExists { .. })));
    }

    #[tokio::test]
    async fn test_service_delete_cascades_to_prestations() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        let service = Service::new("Nails", ServiceKind::NailCare).with_position(1);
        let prestation = Prestation::new(service.id, "Manicure", 2500, 45).inactive();

        repo.create_service(&service).await.unwrap();
        repo.create_prestation(&prestation).await.unwrap();
        assert_eq!(
            repo.get_prestation(prestation.id).await.unwrap(),
            Some(prestation.clone())
        );

        repo.delete_service(service.id).await.unwrap();
        assert!(repo.get_prestation(prestation.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_prestation_with_unknown_service_is_invalid() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        let prestation = Prestation::new(Uuid::new_v4(), "Orphan", 1000, 30);

        let result = repo.create_prestation(&prestation).await;
        assert!(matches!(result, Err(RepositoryError::InvalidData(_))));
    }

    #[tokio::test]
    async fn test_opening_hours_upsert_on_salon_and_date() {
        let (repo, salon) = repo_with_salon().await;
        let day = date(2025, 3, 5);
        let closed = OpeningHours::closed(salon.id, day);
        repo.upsert_opening_hours(&closed).await.unwrap();

        let open = OpeningHours::open(
            salon.id,
            day,
            vec![
                TimeSlot::new(t(9, 0), t(12, 0)),
                TimeSlot::new(t(14, 0), t(18, 0)),
            ],
        );
        repo.upsert_opening_hours(&open).await.unwrap();

        let stored = repo
            .get_opening_hours_for_day(salon.id, day)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.id, closed.id);
        assert!(!stored.is_closed);
        assert_eq!(stored.slots, open.slots);

        let week = repo
            .list_opening_hours(Some(salon.id), DateRange::week(day))
            .await
            .unwrap();
        assert_eq!(week.len(), 1);
        let everyone = repo
            .list_opening_hours(None, DateRange::week(day))
            .await
            .unwrap();
        assert_eq!(everyone.len(), 1);
    }

    #[tokio::test]
    async fn test_reservation_round_trip_and_filters() {
        let (repo, salon) = repo_with_salon().await;
        let user = User::new("Léa", "lea@example.com");
        repo.create_user(&user).await.unwrap();

        let day = date(2025, 3, 5);
        let prestation_ids = vec![Uuid::new_v4(), Uuid::new_v4()];
        let afternoon =
            Reservation::pending(salon.id, user.id, prestation_ids.clone(), day, t(14, 0), t(15, 30))
                .with_total_price(6500)
                .with_notes("Long nails");
        let morning = Reservation::pending(salon.id, user.id, vec![], day, t(9, 0), t(9, 45))
            .with_status(ReservationStatus::Cancelled);
        repo.create_reservation(&afternoon).await.unwrap();
        repo.create_reservation(&morning).await.unwrap();

        let stored = repo.get_reservation(afternoon.id).await.unwrap().unwrap();
        assert_eq!(stored.prestation_ids, prestation_ids);
        assert_eq!(stored.start_time, t(14, 0));
        assert_eq!(stored.end_time, t(15, 30));
        assert_eq!(stored.total_price_cents, 6500);

        let day_list = repo
            .list_reservations(&ReservationFilter::salon_day(salon.id, day))
            .await
            .unwrap();
        assert_eq!(
            day_list.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![morning.id, afternoon.id]
        );

        let cancelled = repo
            .list_reservations(&ReservationFilter {
                status: Some(ReservationStatus::Cancelled),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(cancelled.len(), 1);

        let mut moved = stored.clone();
        moved.status = ReservationStatus::Confirmed;
        repo.update_reservation(&moved).await.unwrap();
        let by_user = repo
            .list_reservations(&ReservationFilter {
                user_id: Some(user.id),
                status: Some(ReservationStatus::Confirmed),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_user.len(), 1);
    }

    #[tokio::test]
    async fn test_user_email_unique_and_lookup() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        let user = User::new("Léa", "lea@example.com").with_phone("0600000000");
        repo.create_user(&user).await.unwrap();

        let found = repo.get_user_by_email("lea@example.com").await.unwrap();
        assert_eq!(found, Some(user));

        let result = repo.create_user(&User::new("Twin", "lea@example.com")).await;
        assert!(matches!(result, Err(RepositoryError::AlreadyExists { .. })));
    }

    #[tokio::test]
    async fn test_tattoo_and_flash_requests() {
        let (repo, salon) = repo_with_salon().await;
        let user = User::new("Sam", "sam@example.com");
        repo.create_user(&user).await.unwrap();

        let mut tattoo = TattooRequest::new(user.id, "Swallow on a branch", "forearm");
        tattoo.salon_id = Some(salon.id);
        tattoo.reference_urls = vec!["https://example.com/ref.png".to_string()];
        repo.create_tattoo_request(&tattoo).await.unwrap();

        tattoo.status = salonbook_core::booking::RequestStatus::Contacted;
        tattoo.admin_notes = Some("Called on Monday".to_string());
        repo.update_tattoo_request(&tattoo).await.unwrap();
        let stored = repo.get_tattoo_request(tattoo.id).await.unwrap().unwrap();
        assert_eq!(stored, tattoo);

        let mut flash = FlashTattooRequest::new(user.id, Uuid::new_v4(), "ankle");
        flash.preferred_date = Some(date(2025, 4, 1));
        repo.create_flash_request(&flash).await.unwrap();
        assert_eq!(repo.list_flash_requests().await.unwrap(), vec![flash.clone()]);

        repo.delete_flash_request(flash.id).await.unwrap();
        let result = repo.delete_flash_request(flash.id).await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_reviews_published_filter() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        let mut review = Review::new("Inès", 5, "Very precise work");
        repo.create_review(&review).await.unwrap();
        assert!(repo.list_reviews(true).await.unwrap().is_empty());

        review.published = true;
        repo.update_review(&review).await.unwrap();
        assert_eq!(repo.list_reviews(true).await.unwrap(), vec![review]);
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        let salon = Salon::new("Ghost", "ghost", "Nowhere");

        let result = repo.update_salon(&salon).await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }
}
