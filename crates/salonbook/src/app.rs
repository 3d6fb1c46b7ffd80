use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::{get, patch, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        availability::{get_availability, get_available_days},
        health::{livez, readyz},
        opening_hours::{
            close_week, delete_opening_hours, list_opening_hours, update_opening_hours,
            upsert_opening_hours,
        },
        pages::{admin_dashboard, booking_form, index, services, submit_booking},
        prestations::{create_prestation, delete_prestation, get_prestation, update_prestation},
        requests::{
            create_flash_request, create_tattoo_request, delete_flash_request,
            delete_tattoo_request, list_flash_requests, list_tattoo_requests,
            update_flash_request, update_tattoo_request,
        },
        reservations::{
            create_reservation, delete_reservation, get_reservation, list_reservations,
            reschedule_reservation, update_reservation_status,
        },
        reviews::{
            create_review, delete_review, list_all_reviews, list_published_reviews, update_review,
        },
        salons::{create_salon, get_salon, list_salons, update_salon},
        services::{create_service, delete_service, get_service, list_services, update_service},
        users::{get_user, list_user_reservations, list_users},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState, request_timeout: Duration) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    // Back-office routes
    let admin_routes = Router::new()
        .route("/salons", post(create_salon))
        .route("/salons/{id}", put(update_salon))
        .route("/salons/{id}/weeks/{date}/close", post(close_week))
        .route("/services", post(create_service))
        .route(
            "/services/{id}",
            put(update_service).delete(delete_service),
        )
        .route("/prestations", post(create_prestation))
        .route(
            "/prestations/{id}",
            put(update_prestation).delete(delete_prestation),
        )
        .route("/opening-hours", post(upsert_opening_hours))
        .route(
            "/opening-hours/{id}",
            put(update_opening_hours).delete(delete_opening_hours),
        )
        .route("/reservations", get(list_reservations))
        .route(
            "/reservations/{id}",
            get(get_reservation)
                .put(reschedule_reservation)
                .delete(delete_reservation),
        )
        .route(
            "/reservations/{id}/status",
            patch(update_reservation_status),
        )
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user))
        .route("/users/{id}/reservations", get(list_user_reservations))
        .route("/tattoo-requests", get(list_tattoo_requests))
        .route(
            "/tattoo-requests/{id}",
            patch(update_tattoo_request).delete(delete_tattoo_request),
        )
        .route("/flash-tattoo-requests", get(list_flash_requests))
        .route(
            "/flash-tattoo-requests/{id}",
            patch(update_flash_request).delete(delete_flash_request),
        )
        .route("/reviews", get(list_all_reviews))
        .route("/reviews/{id}", patch(update_review).delete(delete_review));

    // API routes with CORS
    let api_routes = Router::new()
        .route("/salons", get(list_salons))
        .route("/salons/{id}", get(get_salon))
        .route("/services", get(list_services))
        .route("/services/{id}", get(get_service))
        .route("/prestations/{id}", get(get_prestation))
        .route("/opening-hours", get(list_opening_hours))
        .route("/availability", get(get_availability))
        .route("/availability/days", get(get_available_days))
        .route("/reservations", post(create_reservation))
        .route("/tattoo-requests", post(create_tattoo_request))
        .route("/flash-tattoo-requests", post(create_flash_request))
        .route(
            "/reviews",
            get(list_published_reviews).post(create_review),
        )
        .nest("/admin", admin_routes)
        .layer(cors);

    // Main application router
    Router::new()
        .route("/", get(index))
        .route("/services", get(services))
        .route("/booking", get(booking_form).post(submit_booking))
        .route("/admin", get(admin_dashboard))
        .route("/livez", get(livez))
        .route("/readyz", get(readyz))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .with_state(state)
}
