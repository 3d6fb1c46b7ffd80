use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use salonbook_core::catalog::{
    active_prestations, validate_service, CreateServiceRequest, Prestation, Service,
    ServiceWithPrestations, UpdateServiceRequest,
};
use salonbook_core::storage::RepositoryError;

use super::{json_body, AppError};
use crate::state::AppState;

/// Every service with its bookable prestations, in display order.
pub(crate) async fn load_catalog(state: &AppState) -> Result<Vec<ServiceWithPrestations>, AppError> {
    let services = state.service_repo.list_services().await?;
    let prestations = state.prestation_repo.list_prestations().await?;

    Ok(services
        .into_iter()
        .map(|service| {
            let own: Vec<Prestation> = prestations
                .iter()
                .filter(|p| p.service_id == service.id)
                .cloned()
                .collect();
            ServiceWithPrestations {
                prestations: active_prestations(&own).into_iter().cloned().collect(),
                service,
            }
        })
        .collect())
}

/// List services with their active prestations (GET /api/services).
pub async fn list_services(
    State(state): State<AppState>,
) -> Result<Json<Vec<ServiceWithPrestations>>, AppError> {
    Ok(Json(load_catalog(&state).await?))
}

/// Get a service with its active prestations (GET /api/services/{id}).
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ServiceWithPrestations>, AppError> {
    let service = state
        .service_repo
        .get_service(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Service", id))?;
    let prestations = state
        .prestation_repo
        .list_prestations_by_service(id)
        .await?;

    Ok(Json(ServiceWithPrestations {
        prestations: active_prestations(&prestations)
            .into_iter()
            .cloned()
            .collect(),
        service,
    }))
}

/// Create a service (POST /api/admin/services).
pub async fn create_service(
    State(state): State<AppState>,
    payload: Result<Json<CreateServiceRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let service = json_body(payload)?.into_service();
    validate_service(&service)?;

    state.service_repo.create_service(&service).await?;

    tracing::info!(service_id = %service.id, name = %service.name, "Created service");

    Ok((StatusCode::CREATED, Json(service)))
}

/// Update a service (PUT /api/admin/services/{id}).
pub async fn update_service(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<UpdateServiceRequest>, JsonRejection>,
) -> Result<Json<Service>, AppError> {
    let request = json_body(payload)?;

    let mut service = state
        .service_repo
        .get_service(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Service", id))?;

    request.apply_to(&mut service);
    validate_service(&service)?;
    state.service_repo.update_service(&service).await?;

    tracing::info!(service_id = %id, "Updated service");

    Ok(Json(service))
}

/// Delete a service and its prestations (DELETE /api/admin/services/{id}).
pub async fn delete_service(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.service_repo.delete_service(id).await?;

    tracing::info!(service_id = %id, "Deleted service and its prestations");

    Ok(StatusCode::NO_CONTENT)
}
