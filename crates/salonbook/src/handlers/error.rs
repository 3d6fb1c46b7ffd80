use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use salonbook_core::booking::BookingError;
use salonbook_core::catalog::CatalogError;
use salonbook_core::schedule::ScheduleError;
use salonbook_core::storage::{
    booking_error_to_status_code, catalog_error_to_status_code, repository_error_to_status_code,
    DateRangeError, RepositoryError,
};

/// A request the client has to fix (bad body, bad query, inconsistent ids).
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct BadRequest(pub String);

#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self(BadRequest(message.into()).into())
    }

    /// Status code picked from the error the handler gave up on.
    pub fn status(&self) -> StatusCode {
        let code = if let Some(e) = self.0.downcast_ref::<RepositoryError>() {
            repository_error_to_status_code(e)
        } else if let Some(e) = self.0.downcast_ref::<BookingError>() {
            booking_error_to_status_code(e)
        } else if let Some(e) = self.0.downcast_ref::<CatalogError>() {
            catalog_error_to_status_code(e)
        } else if self.0.is::<ScheduleError>()
            || self.0.is::<DateRangeError>()
            || self.0.is::<BadRequest>()
        {
            400
        } else {
            500
        };

        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.0.to_string();

        if status.is_server_error() {
            tracing::error!(status = %status, error = ?self.0, "Request failed");
        } else {
            tracing::warn!(status = %status, message = %message, "API error");
        }

        (status, message).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
