//! Slot availability endpoints.
//!
//! The duration is either the sum of the selected prestations or an explicit
//! `duration_minutes`. `prestation_ids` may be repeated in the query string,
//! hence the `axum_extra` query extractor.

use axum::{extract::State, Json};
use axum_extra::extract::Query;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use salonbook_core::catalog::MAX_DURATION_MINUTES;
use salonbook_core::storage::{DateRange, RepositoryError};

use super::AppError;
use crate::booking::{open_days, resolve_selection, slots_for_day};
use crate::state::AppState;

/// Longest range `/availability/days` scans.
const MAX_SCAN_DAYS: i64 = 62;

/// Query parameters for the slots of one day.
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub salon_id: Uuid,
    pub date: NaiveDate,
    #[serde(default)]
    pub prestation_ids: Vec<Uuid>,
    pub duration_minutes: Option<u32>,
}

/// Query parameters for the bookable days of a range.
#[derive(Debug, Deserialize)]
pub struct AvailableDaysQuery {
    pub salon_id: Uuid,
    /// First day (default: today)
    pub start: Option<NaiveDate>,
    /// Last day, inclusive (default: start + 27 days)
    pub end: Option<NaiveDate>,
    #[serde(default)]
    pub prestation_ids: Vec<Uuid>,
    pub duration_minutes: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub salon_id: Uuid,
    pub date: NaiveDate,
    pub duration_minutes: u32,
    /// Start times as `HH:MM`.
    pub slots: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AvailableDaysResponse {
    pub salon_id: Uuid,
    pub duration_minutes: u32,
    pub days: Vec<NaiveDate>,
}

/// Works out the appointment length from the query.
async fn requested_duration(
    state: &AppState,
    prestation_ids: &[Uuid],
    duration_minutes: Option<u32>,
) -> Result<u32, AppError> {
    if !prestation_ids.is_empty() {
        let (_, totals) = resolve_selection(state, prestation_ids).await?;
        return Ok(totals.duration_minutes);
    }

    match duration_minutes {
        Some(0) => Err(AppError::bad_request("duration_minutes must be positive")),
        Some(minutes) if minutes > MAX_DURATION_MINUTES => Err(AppError::bad_request(format!(
            "duration_minutes must be at most {MAX_DURATION_MINUTES}"
        ))),
        Some(minutes) => Ok(minutes),
        None => Err(AppError::bad_request(
            "Provide prestation_ids or duration_minutes",
        )),
    }
}

async fn require_salon(state: &AppState, salon_id: Uuid) -> Result<(), AppError> {
    match state.salon_repo.get_salon(salon_id).await? {
        Some(_) => Ok(()),
        None => Err(RepositoryError::not_found("Salon", salon_id).into()),
    }
}

/// Bookable start times of a salon day (GET /api/availability).
pub async fn get_availability(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    require_salon(&state, query.salon_id).await?;
    let duration_minutes =
        requested_duration(&state, &query.prestation_ids, query.duration_minutes).await?;

    let slots = slots_for_day(&state, query.salon_id, query.date, duration_minutes).await?;

    tracing::debug!(
        salon_id = %query.salon_id,
        date = %query.date,
        duration_minutes,
        slots = slots.len(),
        "Computed availability"
    );

    Ok(Json(AvailabilityResponse {
        salon_id: query.salon_id,
        date: query.date,
        duration_minutes,
        slots: slots
            .iter()
            .map(|t| t.format("%H:%M").to_string())
            .collect(),
    }))
}

/// Days with at least one bookable start time (GET /api/availability/days).
pub async fn get_available_days(
    State(state): State<AppState>,
    Query(query): Query<AvailableDaysQuery>,
) -> Result<Json<AvailableDaysResponse>, AppError> {
    require_salon(&state, query.salon_id).await?;
    let duration_minutes =
        requested_duration(&state, &query.prestation_ids, query.duration_minutes).await?;

    let start = query
        .start
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let end = query
        .end
        .unwrap_or_else(|| DateRange::starting_at(start, 28).end);
    let range = DateRange::bounded(start, end, MAX_SCAN_DAYS)?;

    let days = open_days(&state, query.salon_id, range, duration_minutes).await?;

    Ok(Json(AvailableDaysResponse {
        salon_id: query.salon_id,
        duration_minutes,
        days,
    }))
}
