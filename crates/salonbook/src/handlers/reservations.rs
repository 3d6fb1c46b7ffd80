//! Reservation handlers.
//!
//! The booking rules themselves live in [`crate::booking`]; these handlers
//! only parse requests and shape responses.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use salonbook_core::booking::{
    CreateReservationRequest, RescheduleReservationRequest, Reservation, ReservationStatus,
    UpdateReservationStatus,
};
use salonbook_core::storage::{DateRange, RepositoryError, ReservationFilter};

use super::{json_body, AppError};
use crate::{booking, state::AppState};

/// Longest range the admin listing serves.
const MAX_LIST_DAYS: i64 = 366;

/// Query parameters for listing reservations.
#[derive(Debug, Default, Deserialize)]
pub struct ListReservationsQuery {
    pub salon_id: Option<Uuid>,
    /// First day; defaults to today when only `end` is given
    pub start: Option<NaiveDate>,
    /// Last day, inclusive; defaults to start + 30 days when only `start` is given
    pub end: Option<NaiveDate>,
    pub status: Option<ReservationStatus>,
}

impl ListReservationsQuery {
    fn into_filter(self) -> Result<ReservationFilter, AppError> {
        let date_range = match (self.start, self.end) {
            (None, None) => None,
            (start, end) => {
                let start = start.unwrap_or_else(|| chrono::Local::now().date_naive());
                let end = end.unwrap_or_else(|| DateRange::starting_at(start, 31).end);
                Some(DateRange::bounded(start, end, MAX_LIST_DAYS)?)
            }
        };

        Ok(ReservationFilter {
            salon_id: self.salon_id,
            user_id: None,
            date_range,
            status: self.status,
        })
    }
}

/// Book an appointment (POST /api/reservations).
pub async fn create_reservation(
    State(state): State<AppState>,
    payload: Result<Json<CreateReservationRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let request = json_body(payload)?;
    tracing::debug!(
        salon_id = %request.salon_id,
        date = %request.date,
        start = %request.start_time,
        prestations = request.prestation_ids.len(),
        "Received reservation request"
    );

    let reservation = booking::create_reservation(&state, request).await?;

    Ok((StatusCode::CREATED, Json(reservation)))
}

/// List reservations (GET /api/admin/reservations).
pub async fn list_reservations(
    State(state): State<AppState>,
    Query(query): Query<ListReservationsQuery>,
) -> Result<Json<Vec<Reservation>>, AppError> {
    let filter = query.into_filter()?;
    let reservations = state.reservation_repo.list_reservations(&filter).await?;

    Ok(Json(reservations))
}

/// Get a reservation (GET /api/admin/reservations/{id}).
pub async fn get_reservation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Reservation>, AppError> {
    let reservation = state
        .reservation_repo
        .get_reservation(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Reservation", id))?;

    Ok(Json(reservation))
}

/// Move a reservation (PUT /api/admin/reservations/{id}).
pub async fn reschedule_reservation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<RescheduleReservationRequest>, JsonRejection>,
) -> Result<Json<Reservation>, AppError> {
    let request = json_body(payload)?;
    let reservation = booking::reschedule_reservation(&state, id, request).await?;

    Ok(Json(reservation))
}

/// Change a reservation's status (PATCH /api/admin/reservations/{id}/status).
pub async fn update_reservation_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<UpdateReservationStatus>, JsonRejection>,
) -> Result<Json<Reservation>, AppError> {
    let UpdateReservationStatus { status } = json_body(payload)?;
    let reservation = booking::change_reservation_status(&state, id, status).await?;

    Ok(Json(reservation))
}

/// Delete a reservation (DELETE /api/admin/reservations/{id}).
pub async fn delete_reservation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.reservation_repo.delete_reservation(id).await?;

    tracing::info!(reservation_id = %id, "Deleted reservation");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_without_dates_has_no_range() {
        let filter = ListReservationsQuery::default().into_filter().unwrap();
        assert!(filter.date_range.is_none());
    }

    #[test]
    fn test_filter_fills_missing_end() {
        let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let filter = ListReservationsQuery {
            start: Some(start),
            status: Some(ReservationStatus::Pending),
            ..Default::default()
        }
        .into_filter()
        .unwrap();

        let range = filter.date_range.unwrap();
        assert_eq!(range.start, start);
        assert_eq!(range.end, NaiveDate::from_ymd_opt(2025, 3, 31).unwrap());
        assert_eq!(filter.status, Some(ReservationStatus::Pending));
    }

    #[test]
    fn test_filter_rejects_inverted_range() {
        let result = ListReservationsQuery {
            start: NaiveDate::from_ymd_opt(2025, 3, 10),
            end: NaiveDate::from_ymd_opt(2025, 3, 1),
            ..Default::default()
        }
        .into_filter();

        assert!(result.is_err());
    }
}
