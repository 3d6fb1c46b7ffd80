use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use salonbook_core::booking::{Reservation, User};
use salonbook_core::storage::{RepositoryError, ReservationFilter};

use super::AppError;
use crate::state::AppState;

/// List customers (GET /api/admin/users).
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(state.user_repo.list_users().await?))
}

/// Get a customer (GET /api/admin/users/{id}).
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    let user = state
        .user_repo
        .get_user(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("User", id))?;

    Ok(Json(user))
}

/// A customer's reservations, oldest first (GET /api/admin/users/{id}/reservations).
pub async fn list_user_reservations(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Reservation>>, AppError> {
    if state.user_repo.get_user(id).await?.is_none() {
        return Err(RepositoryError::not_found("User", id).into());
    }

    let reservations = state
        .reservation_repo
        .list_reservations(&ReservationFilter {
            user_id: Some(id),
            ..Default::default()
        })
        .await?;

    Ok(Json(reservations))
}
