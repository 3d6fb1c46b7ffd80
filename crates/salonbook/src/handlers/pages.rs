//! Server-rendered pages.
//!
//! Templates receive small view structs with every value already formatted,
//! so the templates stay free of logic.

use std::collections::HashMap;

use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::{Form, FormRejection, Query};
use chrono::{Duration, NaiveDate};
use uuid::Uuid;

use salonbook_core::booking::{Reservation, ReservationStatus};
use salonbook_core::catalog::{format_price, CatalogError, Prestation, Salon, ServiceWithPrestations};
use salonbook_core::schedule::{OpeningHours, TimeSlot};
use salonbook_core::storage::{DateRange, ReservationFilter};

use super::{services::load_catalog, AppError};
use crate::{
    booking,
    models::{BookingForm, BookingQuery},
    state::AppState,
};

/// Template wrapper that converts Askama templates into HTML responses.
struct HtmlTemplate<T>(T);

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "Failed to render template");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to render template: {err}"),
                )
                    .into_response()
            }
        }
    }
}

// ============================================================================
// View models
// ============================================================================

struct SalonView {
    id: String,
    name: String,
    address: String,
    selected: bool,
}

impl SalonView {
    fn new(salon: &Salon, selected: Option<Uuid>) -> Self {
        Self {
            id: salon.id.to_string(),
            name: salon.name.clone(),
            address: salon.address.clone(),
            selected: selected == Some(salon.id),
        }
    }
}

struct PrestationView {
    id: String,
    name: String,
    description: String,
    price: String,
    duration: String,
    selected: bool,
}

impl PrestationView {
    fn new(prestation: &Prestation, selected: &[Uuid]) -> Self {
        Self {
            id: prestation.id.to_string(),
            name: prestation.name.clone(),
            description: prestation.description.clone().unwrap_or_default(),
            price: format_price(prestation.price_cents),
            duration: format_duration(prestation.duration_minutes),
            selected: selected.contains(&prestation.id),
        }
    }
}

struct ServiceView {
    name: String,
    kind: String,
    description: String,
    prestations: Vec<PrestationView>,
}

impl ServiceView {
    fn new(entry: &ServiceWithPrestations, selected: &[Uuid]) -> Self {
        Self {
            name: entry.service.name.clone(),
            kind: entry.service.kind.label().to_string(),
            description: entry.service.description.clone().unwrap_or_default(),
            prestations: entry
                .prestations
                .iter()
                .map(|p| PrestationView::new(p, selected))
                .collect(),
        }
    }
}

struct ReviewView {
    author: String,
    stars: String,
    comment: String,
}

struct ReservationRow {
    date: String,
    start: String,
    end: String,
    salon: String,
    customer: String,
    status: String,
    total: String,
}

struct RequestRow {
    received: String,
    customer: String,
    summary: String,
    status: String,
}

struct HoursRow {
    salon: String,
    day: String,
    hours: String,
}

fn format_duration(minutes: u32) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{m} min"),
        (h, 0) => format!("{h} h"),
        (h, m) => format!("{h} h {m:02}"),
    }
}

fn format_slots(hours: &OpeningHours) -> String {
    if !hours.is_open() {
        return "Closed".to_string();
    }
    hours
        .slots
        .iter()
        .map(|TimeSlot { start, end }| format!("{} - {}", start.format("%H:%M"), end.format("%H:%M")))
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Home and services
// ============================================================================

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    salons: Vec<SalonView>,
    services: Vec<ServiceView>,
    reviews: Vec<ReviewView>,
}

/// Handler for the home page (GET /).
pub async fn index(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let salons = state.salon_repo.list_salons().await?;
    let catalog = load_catalog(&state).await?;
    let reviews = state.review_repo.list_reviews(true).await?;

    Ok(HtmlTemplate(IndexTemplate {
        salons: salons.iter().map(|s| SalonView::new(s, None)).collect(),
        services: catalog.iter().map(|s| ServiceView::new(s, &[])).collect(),
        reviews: reviews
            .iter()
            .take(3)
            .map(|r| ReviewView {
                author: r.author_name.clone(),
                stars: format!(
                    "{}{}",
                    "★".repeat(r.rating as usize),
                    "☆".repeat(5usize.saturating_sub(r.rating as usize))
                ),
                comment: r.comment.clone(),
            })
            .collect(),
    }))
}

#[derive(Template)]
#[template(path = "services.html")]
struct ServicesTemplate {
    services: Vec<ServiceView>,
}

/// Handler for the services page (GET /services).
pub async fn services(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let catalog = load_catalog(&state).await?;

    Ok(HtmlTemplate(ServicesTemplate {
        services: catalog.iter().map(|s| ServiceView::new(s, &[])).collect(),
    }))
}

// ============================================================================
// Booking
// ============================================================================

#[derive(Template)]
#[template(path = "booking.html")]
struct BookingTemplate {
    salons: Vec<SalonView>,
    services: Vec<ServiceView>,
    salon_id: String,
    date: String,
    min_date: String,
    /// Duration and price of the selection, once it is valid.
    summary: Option<String>,
    searched: bool,
    slots: Vec<String>,
    error: Option<String>,
}

/// Builds the booking page for the current selection.
async fn booking_page(
    state: &AppState,
    query: &BookingQuery,
    error: Option<String>,
) -> Result<BookingTemplate, AppError> {
    let salons = state.salon_repo.list_salons().await?;
    let catalog = load_catalog(state).await?;
    let today = chrono::Local::now().date_naive();

    let mut page = BookingTemplate {
        salons: salons
            .iter()
            .map(|s| SalonView::new(s, query.salon_id))
            .collect(),
        services: catalog
            .iter()
            .map(|s| ServiceView::new(s, &query.prestation_ids))
            .collect(),
        salon_id: query.salon_id.map(|id| id.to_string()).unwrap_or_default(),
        date: query.date.map(|d| d.to_string()).unwrap_or_default(),
        min_date: today.to_string(),
        summary: None,
        searched: false,
        slots: Vec::new(),
        error,
    };

    if query.prestation_ids.is_empty() {
        return Ok(page);
    }

    let totals = match booking::resolve_selection(state, &query.prestation_ids).await {
        Ok((_, totals)) => totals,
        Err(err) => match err.downcast::<CatalogError>() {
            Ok(catalog_error) => {
                page.error.get_or_insert(catalog_error.to_string());
                return Ok(page);
            }
            Err(err) => return Err(err.into()),
        },
    };
    page.summary = Some(format!(
        "{} · {}",
        format_duration(totals.duration_minutes),
        format_price(totals.price_cents)
    ));

    if let (Some(salon_id), Some(date)) = (query.salon_id, query.date) {
        page.searched = true;
        page.slots = booking::slots_for_day(state, salon_id, date, totals.duration_minutes)
            .await?
            .iter()
            .map(|t| t.format("%H:%M").to_string())
            .collect();
    }

    Ok(page)
}

/// Handler for the booking page (GET /booking).
pub async fn booking_form(
    State(state): State<AppState>,
    Query(query): Query<BookingQuery>,
) -> Result<impl IntoResponse, AppError> {
    Ok(HtmlTemplate(booking_page(&state, &query, None).await?))
}

#[derive(Template)]
#[template(path = "booking_confirmed.html")]
struct BookingConfirmedTemplate {
    reference: String,
    salon: String,
    date: String,
    start: String,
    end: String,
    total: String,
    email: String,
}

/// Handler for the booking form submission (POST /booking).
///
/// Client errors re-render the booking page with the message and the
/// matching status; the customer keeps their selection.
pub async fn submit_booking(
    State(state): State<AppState>,
    form_result: Result<Form<BookingForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(form) = form_result.map_err(|e| {
        AppError::bad_request(format!("Failed to parse form: {e}"))
    })?;
    tracing::debug!(salon_id = %form.salon_id, date = %form.date, "Received booking form");

    let query = form.to_query();
    let email = form.email.trim().to_lowercase();

    match booking::create_reservation(&state, form.into_request()).await {
        Ok(reservation) => {
            let salon = state
                .salon_repo
                .get_salon(reservation.salon_id)
                .await?
                .map(|s| s.name)
                .unwrap_or_default();

            Ok(HtmlTemplate(BookingConfirmedTemplate {
                reference: reservation.id.to_string(),
                salon,
                date: reservation.date.format("%A %d %B %Y").to_string(),
                start: reservation.start_time.format("%H:%M").to_string(),
                end: reservation.end_time.format("%H:%M").to_string(),
                total: format_price(reservation.total_price_cents),
                email,
            })
            .into_response())
        }
        Err(err) => {
            let err = AppError(err);
            let status = err.status();
            if status.is_server_error() {
                return Err(err);
            }

            tracing::warn!(status = %status, message = %err.0, "Booking rejected");
            let page = booking_page(&state, &query, Some(err.0.to_string())).await?;
            Ok((status, HtmlTemplate(page)).into_response())
        }
    }
}

// ============================================================================
// Admin dashboard
// ============================================================================

#[derive(Template)]
#[template(path = "admin.html")]
struct AdminTemplate {
    week_start: String,
    reservations: Vec<ReservationRow>,
    tattoo_requests: Vec<RequestRow>,
    flash_requests: Vec<RequestRow>,
    hours: Vec<HoursRow>,
}

/// Handler for the admin dashboard (GET /admin).
pub async fn admin_dashboard(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let today = chrono::Local::now().date_naive();
    let week = DateRange::week(today);

    let salons: HashMap<Uuid, String> = state
        .salon_repo
        .list_salons()
        .await?
        .into_iter()
        .map(|s| (s.id, s.name))
        .collect();
    let customers: HashMap<Uuid, String> = state
        .user_repo
        .list_users()
        .await?
        .into_iter()
        .map(|u| (u.id, format!("{} <{}>", u.name, u.email)))
        .collect();
    let prestations: HashMap<Uuid, String> = state
        .prestation_repo
        .list_prestations()
        .await?
        .into_iter()
        .map(|p| (p.id, p.name))
        .collect();

    let name_of = |names: &HashMap<Uuid, String>, id: &Uuid| {
        names.get(id).cloned().unwrap_or_else(|| id.to_string())
    };

    let upcoming = DateRange::new(today, today + Duration::days(30))?;
    let reservations: Vec<Reservation> = state
        .reservation_repo
        .list_reservations(&ReservationFilter {
            date_range: Some(upcoming),
            ..Default::default()
        })
        .await?
        .into_iter()
        .filter(|r| r.status.blocks_calendar())
        .collect();

    let tattoo_requests = state.tattoo_repo.list_tattoo_requests().await?;
    let flash_requests = state.flash_repo.list_flash_requests().await?;

    let mut hours = state.opening_hours_repo.list_opening_hours(None, week).await?;
    hours.sort_by(|a, b| {
        name_of(&salons, &a.salon_id)
            .cmp(&name_of(&salons, &b.salon_id))
            .then(a.date.cmp(&b.date))
    });

    Ok(HtmlTemplate(AdminTemplate {
        week_start: week.start.to_string(),
        reservations: reservations
            .iter()
            .map(|r| ReservationRow {
                date: r.date.to_string(),
                start: r.start_time.format("%H:%M").to_string(),
                end: r.end_time.format("%H:%M").to_string(),
                salon: name_of(&salons, &r.salon_id),
                customer: name_of(&customers, &r.user_id),
                status: status_label(r.status).to_string(),
                total: format_price(r.total_price_cents),
            })
            .collect(),
        tattoo_requests: tattoo_requests
            .iter()
            .filter(|r| r.status.is_open())
            .map(|r| RequestRow {
                received: r.created_at.format("%Y-%m-%d").to_string(),
                customer: name_of(&customers, &r.user_id),
                summary: format!("{} ({})", r.description, r.placement),
                status: r.status.to_string(),
            })
            .collect(),
        flash_requests: flash_requests
            .iter()
            .filter(|r| r.status.is_open())
            .map(|r| RequestRow {
                received: r.created_at.format("%Y-%m-%d").to_string(),
                customer: name_of(&customers, &r.user_id),
                summary: format!(
                    "{} ({}{})",
                    name_of(&prestations, &r.prestation_id),
                    r.placement,
                    r.preferred_date
                        .map(|d: NaiveDate| format!(", around {d}"))
                        .unwrap_or_default()
                ),
                status: r.status.to_string(),
            })
            .collect(),
        hours: hours
            .iter()
            .map(|h| HoursRow {
                salon: name_of(&salons, &h.salon_id),
                day: h.date.format("%a %d/%m").to_string(),
                hours: format_slots(h),
            })
            .collect(),
    }))
}

fn status_label(status: ReservationStatus) -> &'static str {
    match status {
        ReservationStatus::Pending => "To confirm",
        ReservationStatus::Confirmed => "Confirmed",
        ReservationStatus::Cancelled => "Cancelled",
        ReservationStatus::Completed => "Completed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(45), "45 min");
        assert_eq!(format_duration(60), "1 h");
        assert_eq!(format_duration(90), "1 h 30");
        assert_eq!(format_duration(125), "2 h 05");
    }

    #[test]
    fn test_format_slots() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        let salon = Uuid::new_v4();
        let open = OpeningHours::open(
            salon,
            day,
            vec![
                TimeSlot::from_hm((9, 0), (12, 0)).unwrap(),
                TimeSlot::from_hm((13, 30), (18, 0)).unwrap(),
            ],
        );

        assert_eq!(format_slots(&open), "09:00 - 12:00, 13:30 - 18:00");
        assert_eq!(format_slots(&OpeningHours::closed(salon, day)), "Closed");
    }
}
