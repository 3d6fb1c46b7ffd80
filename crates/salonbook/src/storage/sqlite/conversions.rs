//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.
//! These are testable in isolation without database access.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rusqlite::Row;
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use salonbook_core::booking::{
    FlashTattooRequest, RequestStatus, Reservation, ReservationStatus, Review, TattooRequest,
    User, UserRole,
};
use salonbook_core::catalog::{Prestation, Salon, Service, ServiceKind};
use salonbook_core::schedule::OpeningHours;
use salonbook_core::serde::parse_time;
use salonbook_core::storage::RepositoryError;

// ============================================================================
// Catalog conversions
// ============================================================================

/// Convert a SQLite row to a Salon.
///
/// Expected columns: id, name, slug, address, phone, created_at, updated_at
pub fn row_to_salon(row: &Row) -> rusqlite::Result<Salon> {
    let id: String = row.get(0)?;
    let created_at: String = row.get(5)?;
    let updated_at: String = row.get(6)?;

    Ok(Salon {
        id: parse_uuid(&id)?,
        name: row.get(1)?,
        slug: row.get(2)?,
        address: row.get(3)?,
        phone: row.get(4)?,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

/// Convert a SQLite row to a Service.
///
/// Expected columns: id, name, description, kind, position, created_at, updated_at
pub fn row_to_service(row: &Row) -> rusqlite::Result<Service> {
    let id: String = row.get(0)?;
    let kind: String = row.get(3)?;
    let created_at: String = row.get(5)?;
    let updated_at: String = row.get(6)?;

    Ok(Service {
        id: parse_uuid(&id)?,
        name: row.get(1)?,
        description: row.get(2)?,
        kind: parse_enum(&kind, ServiceKind::parse)?,
        position: row.get(4)?,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

/// Convert a SQLite row to a Prestation.
///
/// Expected columns: id, service_id, name, description, price_cents,
/// duration_minutes, active, image_url, created_at, updated_at
pub fn row_to_prestation(row: &Row) -> rusqlite::Result<Prestation> {
    let id: String = row.get(0)?;
    let service_id: String = row.get(1)?;
    let created_at: String = row.get(8)?;
    let updated_at: String = row.get(9)?;

    Ok(Prestation {
        id: parse_uuid(&id)?,
        service_id: parse_uuid(&service_id)?,
        name: row.get(2)?,
        description: row.get(3)?,
        price_cents: row.get(4)?,
        duration_minutes: row.get(5)?,
        active: row.get(6)?,
        image_url: row.get(7)?,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

// ============================================================================
// Schedule conversions
// ============================================================================

/// Convert a SQLite row to OpeningHours.
///
/// Expected columns: id, salon_id, date, is_closed, slots, note, created_at, updated_at
pub fn row_to_opening_hours(row: &Row) -> rusqlite::Result<OpeningHours> {
    let id: String = row.get(0)?;
    let salon_id: String = row.get(1)?;
    let date: String = row.get(2)?;
    let slots: String = row.get(4)?;
    let created_at: String = row.get(6)?;
    let updated_at: String = row.get(7)?;

    Ok(OpeningHours {
        id: parse_uuid(&id)?,
        salon_id: parse_uuid(&salon_id)?,
        date: parse_date(&date)?,
        is_closed: row.get(3)?,
        slots: from_json_column(&slots)?,
        note: row.get(5)?,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

// ============================================================================
// Booking conversions
// ============================================================================

/// Convert a SQLite row to a User.
///
/// Expected columns: id, name, email, phone, role, created_at, updated_at
pub fn row_to_user(row: &Row) -> rusqlite::Result<User> {
    let id: String = row.get(0)?;
    let role: String = row.get(4)?;
    let created_at: String = row.get(5)?;
    let updated_at: String = row.get(6)?;

    Ok(User {
        id: parse_uuid(&id)?,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        role: parse_enum(&role, UserRole::parse)?,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

/// Convert a SQLite row to a Reservation.
///
/// Expected columns: id, salon_id, user_id, prestation_ids, date, start_time,
/// end_time, status, total_price_cents, notes, created_at, updated_at
pub fn row_to_reservation(row: &Row) -> rusqlite::Result<Reservation> {
    let id: String = row.get(0)?;
    let salon_id: String = row.get(1)?;
    let user_id: String = row.get(2)?;
    let prestation_ids: String = row.get(3)?;
    let date: String = row.get(4)?;
    let start_time: String = row.get(5)?;
    let end_time: String = row.get(6)?;
    let status: String = row.get(7)?;
    let created_at: String = row.get(10)?;
    let updated_at: String = row.get(11)?;

    Ok(Reservation {
        id: parse_uuid(&id)?,
        salon_id: parse_uuid(&salon_id)?,
        user_id: parse_uuid(&user_id)?,
        prestation_ids: from_json_column(&prestation_ids)?,
        date: parse_date(&date)?,
        start_time: parse_time_column(&start_time)?,
        end_time: parse_time_column(&end_time)?,
        status: parse_enum(&status, ReservationStatus::parse)?,
        total_price_cents: row.get(8)?,
        notes: row.get(9)?,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

/// Convert a SQLite row to a TattooRequest.
///
/// Expected columns: id, user_id, salon_id, description, placement, size_cm,
/// style, budget_cents, reference_urls, status, admin_notes, created_at, updated_at
pub fn row_to_tattoo_request(row: &Row) -> rusqlite::Result<TattooRequest> {
    let id: String = row.get(0)?;
    let user_id: String = row.get(1)?;
    let salon_id: Option<String> = row.get(2)?;
    let reference_urls: String = row.get(8)?;
    let status: String = row.get(9)?;
    let created_at: String = row.get(11)?;
    let updated_at: String = row.get(12)?;

    Ok(TattooRequest {
        id: parse_uuid(&id)?,
        user_id: parse_uuid(&user_id)?,
        salon_id: salon_id.as_deref().map(parse_uuid).transpose()?,
        description: row.get(3)?,
        placement: row.get(4)?,
        size_cm: row.get(5)?,
        style: row.get(6)?,
        budget_cents: row.get(7)?,
        reference_urls: from_json_column(&reference_urls)?,
        status: parse_enum(&status, RequestStatus::parse)?,
        admin_notes: row.get(10)?,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

/// Convert a SQLite row to a FlashTattooRequest.
///
/// Expected columns: id, user_id, prestation_id, placement, preferred_date,
/// status, admin_notes, created_at, updated_at
pub fn row_to_flash_request(row: &Row) -> rusqlite::Result<FlashTattooRequest> {
    let id: String = row.get(0)?;
    let user_id: String = row.get(1)?;
    let prestation_id: String = row.get(2)?;
    let preferred_date: Option<String> = row.get(4)?;
    let status: String = row.get(5)?;
    let created_at: String = row.get(7)?;
    let updated_at: String = row.get(8)?;

    Ok(FlashTattooRequest {
        id: parse_uuid(&id)?,
        user_id: parse_uuid(&user_id)?,
        prestation_id: parse_uuid(&prestation_id)?,
        placement: row.get(3)?,
        preferred_date: preferred_date.as_deref().map(parse_date).transpose()?,
        status: parse_enum(&status, RequestStatus::parse)?,
        admin_notes: row.get(6)?,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

/// Convert a SQLite row to a Review.
///
/// Expected columns: id, author_name, rating, comment, published, created_at, updated_at
pub fn row_to_review(row: &Row) -> rusqlite::Result<Review> {
    let id: String = row.get(0)?;
    let created_at: String = row.get(5)?;
    let updated_at: String = row.get(6)?;

    Ok(Review {
        id: parse_uuid(&id)?,
        author_name: row.get(1)?,
        rating: row.get(2)?,
        comment: row.get(3)?,
        published: row.get(4)?,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

// ============================================================================
// Helper functions
// ============================================================================

/// Serialize a list-valued field for a JSON column.
pub fn to_json_column<T: Serialize + ?Sized>(value: &T) -> Result<String, RepositoryError> {
    serde_json::to_string(value).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

fn from_json_column<T: DeserializeOwned>(json: &str) -> rusqlite::Result<T> {
    serde_json::from_str(json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn conversion_error(message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Text,
        Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, message)),
    )
}

/// Parse a stored enum value with its `parse` function.
fn parse_enum<T>(s: &str, parse: fn(&str) -> Option<T>) -> rusqlite::Result<T> {
    parse(s).ok_or_else(|| conversion_error(format!("Unknown value: {s}")))
}

/// Parse a UUID from string.
fn parse_uuid(s: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Parse a date from ISO 8601 string (YYYY-MM-DD).
fn parse_date(s: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Parse a time of day stored as HH:MM.
fn parse_time_column(s: &str) -> rusqlite::Result<NaiveTime> {
    parse_time(s).ok_or_else(|| conversion_error(format!("Invalid time: {s}")))
}

/// Parse a datetime from RFC 3339 string.
fn parse_datetime(s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
}

/// Format a DateTime for SQLite storage (RFC 3339).
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

/// Format a NaiveDate for SQLite storage (YYYY-MM-DD).
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Format a NaiveTime for SQLite storage (HH:MM).
pub fn format_time(time: &NaiveTime) -> String {
    time.format("%H:%M").to_string()
}
