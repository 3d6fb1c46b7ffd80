//! Booking workflow shared by the JSON API and the booking pages.
//!
//! Handlers call into these functions; they load what the pure core needs from
//! the repositories, run the availability check and persist the outcome.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use salonbook_core::booking::{
    blocking_intervals, normalize_email, validate_reservation_request, validate_user,
    BookingError, CreateReservationRequest, CustomerDetails, RescheduleReservationRequest,
    Reservation, ReservationStatus, User,
};
use salonbook_core::catalog::{selection_totals, Prestation, SelectionTotals};
use salonbook_core::schedule::{
    available_days, available_slots, is_slot_available, BusyInterval, OpeningHours, SlotQuery,
};
use salonbook_core::storage::{DateRange, RepositoryError, ReservationFilter};

use crate::state::AppState;

/// Looks up the customer by e-mail, creating them on first contact.
///
/// A returning customer who now gives a phone number gets it stored.
pub async fn find_or_create_customer(
    state: &AppState,
    details: CustomerDetails,
) -> anyhow::Result<User> {
    let email = normalize_email(&details.email);

    if let Some(mut user) = state.user_repo.get_user_by_email(&email).await? {
        if user.phone.is_none() && details.phone.is_some() {
            user.phone = details.phone;
            user.updated_at = chrono::Utc::now();
            state.user_repo.update_user(&user).await?;
        }
        return Ok(user);
    }

    let user = CustomerDetails { email, ..details }.into_user();
    validate_user(&user)?;
    state.user_repo.create_user(&user).await?;

    tracing::info!(user_id = %user.id, "Created customer");

    Ok(user)
}

/// Resolves selected prestation ids into prestations and their totals.
pub async fn resolve_selection(
    state: &AppState,
    prestation_ids: &[Uuid],
) -> anyhow::Result<(Vec<Prestation>, SelectionTotals)> {
    let prestations = state.prestation_repo.get_prestations(prestation_ids).await?;
    let totals = selection_totals(prestation_ids, &prestations)?;
    Ok((prestations, totals))
}

/// Opening hours and busy intervals of a salon day.
struct DayCalendar {
    hours: Option<OpeningHours>,
    busy: Vec<BusyInterval>,
}

impl DayCalendar {
    async fn load(
        state: &AppState,
        salon_id: Uuid,
        date: NaiveDate,
        exclude: Option<Uuid>,
    ) -> anyhow::Result<Self> {
        let hours = state
            .opening_hours_repo
            .get_opening_hours_for_day(salon_id, date)
            .await?;
        let reservations = state
            .reservation_repo
            .list_reservations(&ReservationFilter::salon_day(salon_id, date))
            .await?;

        Ok(Self {
            hours,
            busy: blocking_intervals(&reservations, exclude),
        })
    }

    fn query(&self, state: &AppState, date: NaiveDate, duration_minutes: u32) -> SlotQuery<'_> {
        SlotQuery {
            date,
            hours: self.hours.as_ref(),
            busy: &self.busy,
            duration_minutes,
            now: state.now(),
        }
    }
}

/// Bookable start times for a salon day.
pub async fn slots_for_day(
    state: &AppState,
    salon_id: Uuid,
    date: NaiveDate,
    duration_minutes: u32,
) -> anyhow::Result<Vec<NaiveTime>> {
    let day = DayCalendar::load(state, salon_id, date, None).await?;
    Ok(available_slots(
        &day.query(state, date, duration_minutes),
        &state.rules,
    ))
}

/// Days of `range` that still have at least one bookable start time.
pub async fn open_days(
    state: &AppState,
    salon_id: Uuid,
    range: DateRange,
    duration_minutes: u32,
) -> anyhow::Result<Vec<NaiveDate>> {
    let hours = state
        .opening_hours_repo
        .list_opening_hours(Some(salon_id), range)
        .await?;
    let reservations = state
        .reservation_repo
        .list_reservations(&ReservationFilter {
            salon_id: Some(salon_id),
            date_range: Some(range),
            ..Default::default()
        })
        .await?;

    let mut busy: HashMap<NaiveDate, Vec<BusyInterval>> = HashMap::new();
    for reservation in reservations.iter().filter(|r| r.status.blocks_calendar()) {
        busy.entry(reservation.date)
            .or_default()
            .push(reservation.busy_interval());
    }

    Ok(available_days(
        range,
        &hours,
        &busy,
        duration_minutes,
        state.now(),
        &state.rules,
    ))
}

/// Books an appointment.
///
/// The availability check and the insert run under the booking lock, so two
/// customers racing for the same slot cannot both get it.
pub async fn create_reservation(
    state: &AppState,
    request: CreateReservationRequest,
) -> anyhow::Result<Reservation> {
    validate_reservation_request(&request)?;

    if state.salon_repo.get_salon(request.salon_id).await?.is_none() {
        return Err(RepositoryError::not_found("Salon", request.salon_id).into());
    }

    let (_, totals) = resolve_selection(state, &request.prestation_ids).await?;

    let (salon_id, date, start) = (request.salon_id, request.date, request.start_time);

    let _guard = state.booking_lock.lock().await;

    let day = DayCalendar::load(state, salon_id, date, None).await?;
    if !is_slot_available(
        &day.query(state, date, totals.duration_minutes),
        &state.rules,
        start,
    ) {
        return Err(BookingError::SlotUnavailable { date, start }.into());
    }

    // Customers are only recorded once their booking is accepted.
    let customer = find_or_create_customer(state, request.customer.clone()).await?;
    let reservation =
        request.into_reservation(customer.id, totals.duration_minutes, totals.price_cents);
    state.reservation_repo.create_reservation(&reservation).await?;

    tracing::info!(
        reservation_id = %reservation.id,
        salon_id = %salon_id,
        date = %date,
        start = %start,
        "Created reservation"
    );

    Ok(reservation)
}

/// Moves a reservation to another date or start time, keeping its duration.
pub async fn reschedule_reservation(
    state: &AppState,
    id: Uuid,
    request: RescheduleReservationRequest,
) -> anyhow::Result<Reservation> {
    let _guard = state.booking_lock.lock().await;

    let mut reservation = state
        .reservation_repo
        .get_reservation(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Reservation", id))?;

    if !reservation.status.blocks_calendar() {
        return Err(BookingError::NotReschedulable(reservation.status).into());
    }

    let (date, start) = (request.date, request.start_time);
    let duration = u32::try_from(reservation.duration_minutes()).unwrap_or(0);

    let day = DayCalendar::load(state, reservation.salon_id, date, Some(id)).await?;
    if !is_slot_available(&day.query(state, date, duration), &state.rules, start) {
        return Err(BookingError::SlotUnavailable { date, start }.into());
    }

    request.apply_to(&mut reservation);
    state.reservation_repo.update_reservation(&reservation).await?;

    tracing::info!(reservation_id = %id, date = %date, start = %start, "Rescheduled reservation");

    Ok(reservation)
}

/// Moves a reservation through its lifecycle.
pub async fn change_reservation_status(
    state: &AppState,
    id: Uuid,
    status: ReservationStatus,
) -> anyhow::Result<Reservation> {
    let mut reservation = state
        .reservation_repo
        .get_reservation(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Reservation", id))?;

    if !reservation.status.can_transition_to(status) {
        return Err(BookingError::InvalidTransition {
            from: reservation.status,
            to: status,
        }
        .into());
    }

    reservation.status = status;
    reservation.updated_at = chrono::Utc::now();
    state.reservation_repo.update_reservation(&reservation).await?;

    tracing::info!(reservation_id = %id, status = %status, "Changed reservation status");

    Ok(reservation)
}
