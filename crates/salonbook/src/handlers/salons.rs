use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use salonbook_core::catalog::{validate_salon, CreateSalonRequest, Salon, UpdateSalonRequest};
use salonbook_core::storage::RepositoryError;

use super::{json_body, AppError};
use crate::state::AppState;

/// List all salons (GET /api/salons).
pub async fn list_salons(State(state): State<AppState>) -> Result<Json<Vec<Salon>>, AppError> {
    Ok(Json(state.salon_repo.list_salons().await?))
}

/// Get a single salon by ID (GET /api/salons/{id}).
pub async fn get_salon(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Salon>, AppError> {
    let salon = state
        .salon_repo
        .get_salon(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Salon", id))?;

    Ok(Json(salon))
}

/// Create a salon (POST /api/admin/salons).
pub async fn create_salon(
    State(state): State<AppState>,
    payload: Result<Json<CreateSalonRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let salon = json_body(payload)?.into_salon();
    validate_salon(&salon)?;

    state.salon_repo.create_salon(&salon).await?;

    tracing::info!(salon_id = %salon.id, slug = %salon.slug, "Created salon");

    Ok((StatusCode::CREATED, Json(salon)))
}

/// Update a salon (PUT /api/admin/salons/{id}).
pub async fn update_salon(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<UpdateSalonRequest>, JsonRejection>,
) -> Result<Json<Salon>, AppError> {
    let request = json_body(payload)?;

    let mut salon = state
        .salon_repo
        .get_salon(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Salon", id))?;

    request.apply_to(&mut salon);
    validate_salon(&salon)?;
    state.salon_repo.update_salon(&salon).await?;

    tracing::info!(salon_id = %id, "Updated salon");

    Ok(Json(salon))
}
