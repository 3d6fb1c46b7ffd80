use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use salonbook_core::catalog::{
    validate_prestation, CreatePrestationRequest, Prestation, UpdatePrestationRequest,
};
use salonbook_core::storage::RepositoryError;

use super::{json_body, AppError};
use crate::state::AppState;

async fn require_service(state: &AppState, service_id: Uuid) -> Result<(), AppError> {
    match state.service_repo.get_service(service_id).await? {
        Some(_) => Ok(()),
        None => Err(AppError::bad_request(format!(
            "Service {service_id} not found"
        ))),
    }
}

/// Get a single prestation (GET /api/prestations/{id}).
pub async fn get_prestation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Prestation>, AppError> {
    let prestation = state
        .prestation_repo
        .get_prestation(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Prestation", id))?;

    Ok(Json(prestation))
}

/// Create a prestation (POST /api/admin/prestations).
pub async fn create_prestation(
    State(state): State<AppState>,
    payload: Result<Json<CreatePrestationRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let prestation = json_body(payload)?.into_prestation();
    validate_prestation(&prestation)?;
    require_service(&state, prestation.service_id).await?;

    state.prestation_repo.create_prestation(&prestation).await?;

    tracing::info!(
        prestation_id = %prestation.id,
        service_id = %prestation.service_id,
        name = %prestation.name,
        "Created prestation"
    );

    Ok((StatusCode::CREATED, Json(prestation)))
}

/// Update a prestation (PUT /api/admin/prestations/{id}).
pub async fn update_prestation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<UpdatePrestationRequest>, JsonRejection>,
) -> Result<Json<Prestation>, AppError> {
    let request = json_body(payload)?;
    if let Some(service_id) = request.service_id {
        require_service(&state, service_id).await?;
    }

    let mut prestation = state
        .prestation_repo
        .get_prestation(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Prestation", id))?;

    request.apply_to(&mut prestation);
    validate_prestation(&prestation)?;
    state.prestation_repo.update_prestation(&prestation).await?;

    tracing::info!(prestation_id = %id, "Updated prestation");

    Ok(Json(prestation))
}

/// Delete a prestation (DELETE /api/admin/prestations/{id}).
pub async fn delete_prestation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.prestation_repo.delete_prestation(id).await?;

    tracing::info!(prestation_id = %id, "Deleted prestation");

    Ok(StatusCode::NO_CONTENT)
}
