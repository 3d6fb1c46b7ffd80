//! Opening hours handlers.
//!
//! Writes keep the salons' weeks exclusive: opening a day in one salon closes
//! the same ISO week in every other salon. Reservations that fall on a day
//! being closed are reported back, never cancelled.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use salonbook_core::booking::{conflicting_reservations, Reservation};
use salonbook_core::schedule::{
    plan_week_closure, plan_week_exclusivity, validate_opening_hours, OpeningHours,
    UpdateOpeningHoursRequest, UpsertOpeningHoursRequest,
};
use salonbook_core::storage::{DateRange, RepositoryError, ReservationFilter};

use super::{json_body, AppError};
use crate::state::AppState;

/// Longest range the listing endpoint serves.
const MAX_RANGE_DAYS: i64 = 92;

/// Query parameters for listing opening hours.
#[derive(Debug, Deserialize)]
pub struct ListOpeningHoursQuery {
    /// Restrict to one salon (default: every salon)
    pub salon_id: Option<Uuid>,
    /// First day (default: today)
    pub start: Option<NaiveDate>,
    /// Last day, inclusive (default: start + 6 days)
    pub end: Option<NaiveDate>,
}

/// Result of an opening-hours write.
#[derive(Debug, Serialize)]
pub struct OpeningHoursChange {
    pub opening_hours: OpeningHours,
    /// Days of other salons closed to keep the week exclusive.
    pub closed: Vec<OpeningHours>,
    /// Active reservations on days that are now closed.
    pub conflicts: Vec<Reservation>,
}

/// Days closed by an explicit week closure.
#[derive(Debug, Serialize)]
pub struct WeekClosure {
    pub closed: Vec<OpeningHours>,
    pub conflicts: Vec<Reservation>,
}

/// List opening hours (GET /api/opening-hours).
pub async fn list_opening_hours(
    State(state): State<AppState>,
    Query(query): Query<ListOpeningHoursQuery>,
) -> Result<Json<Vec<OpeningHours>>, AppError> {
    let start = query
        .start
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let end = query
        .end
        .unwrap_or_else(|| DateRange::starting_at(start, 7).end);
    let range = DateRange::bounded(start, end, MAX_RANGE_DAYS)?;

    let hours = state
        .opening_hours_repo
        .list_opening_hours(query.salon_id, range)
        .await?;

    Ok(Json(hours))
}

/// Create or replace the hours of a salon day (POST /api/admin/opening-hours).
pub async fn upsert_opening_hours(
    State(state): State<AppState>,
    payload: Result<Json<UpsertOpeningHoursRequest>, JsonRejection>,
) -> Result<Json<OpeningHoursChange>, AppError> {
    let request = json_body(payload)?;
    tracing::debug!(request = ?request, "Received opening hours upsert");

    if state.salon_repo.get_salon(request.salon_id).await?.is_none() {
        return Err(RepositoryError::not_found("Salon", request.salon_id).into());
    }

    let _guard = state.booking_lock.lock().await;

    let existing = state
        .opening_hours_repo
        .get_opening_hours_for_day(request.salon_id, request.date)
        .await?;
    let hours = request.into_opening_hours(existing);

    save_opening_hours(&state, hours).await.map(Json)
}

/// Update an opening-hours row (PUT /api/admin/opening-hours/{id}).
pub async fn update_opening_hours(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<UpdateOpeningHoursRequest>, JsonRejection>,
) -> Result<Json<OpeningHoursChange>, AppError> {
    let request = json_body(payload)?;

    let _guard = state.booking_lock.lock().await;

    let mut hours = state
        .opening_hours_repo
        .get_opening_hours(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("OpeningHours", id))?;
    request.apply_to(&mut hours);

    save_opening_hours(&state, hours).await.map(Json)
}

/// Delete an opening-hours row (DELETE /api/admin/opening-hours/{id}).
///
/// Without a row the day counts as closed.
pub async fn delete_opening_hours(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.opening_hours_repo.delete_opening_hours(id).await?;

    tracing::info!(opening_hours_id = %id, "Deleted opening hours");

    Ok(StatusCode::NO_CONTENT)
}

/// Close a salon for the whole ISO week of `date`
/// (POST /api/admin/salons/{id}/weeks/{date}/close).
pub async fn close_week(
    State(state): State<AppState>,
    Path((salon_id, date)): Path<(Uuid, NaiveDate)>,
) -> Result<Json<WeekClosure>, AppError> {
    if state.salon_repo.get_salon(salon_id).await?.is_none() {
        return Err(RepositoryError::not_found("Salon", salon_id).into());
    }

    let _guard = state.booking_lock.lock().await;

    let week = DateRange::week(date);
    let existing = state
        .opening_hours_repo
        .list_opening_hours(Some(salon_id), week)
        .await?;
    let closed = plan_week_closure(salon_id, date, &existing);
    for row in &closed {
        state.opening_hours_repo.upsert_opening_hours(row).await?;
    }
    let conflicts = week_conflicts(&state, week, &closed).await?;

    tracing::info!(
        salon_id = %salon_id,
        week_start = %week.start,
        closed = closed.len(),
        conflicts = conflicts.len(),
        "Closed salon week"
    );

    Ok(Json(WeekClosure { closed, conflicts }))
}

/// Validates and stores `hours`, then closes the week in the other salons if
/// the day is open. Callers hold the booking lock.
async fn save_opening_hours(
    state: &AppState,
    hours: OpeningHours,
) -> Result<OpeningHoursChange, AppError> {
    validate_opening_hours(&hours)?;
    state.opening_hours_repo.upsert_opening_hours(&hours).await?;

    tracing::info!(
        opening_hours_id = %hours.id,
        salon_id = %hours.salon_id,
        date = %hours.date,
        is_closed = hours.is_closed,
        "Saved opening hours"
    );

    let week = DateRange::week(hours.date);
    let closed = if hours.is_open() {
        let salons: Vec<Uuid> = state
            .salon_repo
            .list_salons()
            .await?
            .into_iter()
            .map(|s| s.id)
            .collect();
        let existing = state.opening_hours_repo.list_opening_hours(None, week).await?;

        let planned = plan_week_exclusivity(hours.salon_id, hours.date, &salons, &existing);
        for row in &planned {
            state.opening_hours_repo.upsert_opening_hours(row).await?;
        }
        if !planned.is_empty() {
            tracing::info!(
                salon_id = %hours.salon_id,
                week_start = %week.start,
                closed = planned.len(),
                "Closed other salons for the week"
            );
        }
        planned
    } else {
        Vec::new()
    };

    // A day closed by this write may itself hold reservations.
    let mut closed_days = closed.clone();
    if hours.is_closed {
        closed_days.push(hours.clone());
    }
    let conflicts = week_conflicts(state, week, &closed_days).await?;

    Ok(OpeningHoursChange {
        opening_hours: hours,
        closed,
        conflicts,
    })
}

async fn week_conflicts(
    state: &AppState,
    week: DateRange,
    closed_days: &[OpeningHours],
) -> Result<Vec<Reservation>, AppError> {
    if closed_days.is_empty() {
        return Ok(Vec::new());
    }

    let reservations = state
        .reservation_repo
        .list_reservations(&ReservationFilter {
            date_range: Some(week),
            ..Default::default()
        })
        .await?;

    let conflicts: Vec<Reservation> = conflicting_reservations(&reservations, closed_days)
        .into_iter()
        .cloned()
        .collect();

    for reservation in &conflicts {
        tracing::warn!(
            reservation_id = %reservation.id,
            salon_id = %reservation.salon_id,
            date = %reservation.date,
            "Reservation falls on a closed day"
        );
    }

    Ok(conflicts)
}
