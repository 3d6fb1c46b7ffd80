use axum::{extract::rejection::JsonRejection, Json};

pub mod availability;
pub mod error;
pub mod health;
pub mod opening_hours;
pub mod pages;
pub mod prestations;
pub mod requests;
pub mod reservations;
pub mod reviews;
pub mod salons;
pub mod services;
pub mod users;

pub use error::AppError;

/// Unwraps a JSON body, turning a rejection into a 400 with its message.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(value)| value)
        .map_err(|e| AppError::bad_request(format!("Failed to parse JSON: {}", e.body_text())))
}
