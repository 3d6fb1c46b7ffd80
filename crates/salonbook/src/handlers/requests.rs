//! Custom and flash tattoo request handlers.
//!
//! Customers submit requests publicly; the studio follows them up from the
//! admin API. Both kinds share the [`RequestStatus`] lifecycle.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use salonbook_core::booking::{
    validate_flash_request, validate_tattoo_request, BookingError, CreateFlashTattooRequest,
    CreateTattooRequest, FlashTattooRequest, RequestStatus, TattooRequest, UpdateRequestStatus,
};
use salonbook_core::catalog::CatalogError;
use salonbook_core::storage::RepositoryError;

use super::{json_body, AppError};
use crate::{booking::find_or_create_customer, state::AppState};

/// Checks a status change and applies it with the admin notes.
fn apply_status_update(
    current: &mut RequestStatus,
    notes: &mut Option<String>,
    update: UpdateRequestStatus,
) -> Result<(), BookingError> {
    if update.status != *current && !current.can_transition_to(update.status) {
        return Err(BookingError::InvalidRequestTransition {
            from: *current,
            to: update.status,
        });
    }
    *current = update.status;
    if update.admin_notes.is_some() {
        *notes = update.admin_notes;
    }
    Ok(())
}

// ============================================================================
// Custom tattoo requests
// ============================================================================

/// Submit a custom tattoo request (POST /api/tattoo-requests).
pub async fn create_tattoo_request(
    State(state): State<AppState>,
    payload: Result<Json<CreateTattooRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let request = json_body(payload)?;
    validate_tattoo_request(&request)?;

    if let Some(salon_id) = request.salon_id {
        if state.salon_repo.get_salon(salon_id).await?.is_none() {
            return Err(AppError::bad_request(format!("Salon {salon_id} not found")));
        }
    }

    let customer = find_or_create_customer(&state, request.customer.clone()).await?;
    let tattoo = request.into_tattoo_request(customer.id);
    state.tattoo_repo.create_tattoo_request(&tattoo).await?;

    tracing::info!(request_id = %tattoo.id, user_id = %customer.id, "Received tattoo request");

    Ok((StatusCode::CREATED, Json(tattoo)))
}

/// List tattoo requests, newest first (GET /api/admin/tattoo-requests).
pub async fn list_tattoo_requests(
    State(state): State<AppState>,
) -> Result<Json<Vec<TattooRequest>>, AppError> {
    Ok(Json(state.tattoo_repo.list_tattoo_requests().await?))
}

/// Follow up a tattoo request (PATCH /api/admin/tattoo-requests/{id}).
pub async fn update_tattoo_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<UpdateRequestStatus>, JsonRejection>,
) -> Result<Json<TattooRequest>, AppError> {
    let update = json_body(payload)?;

    let mut request = state
        .tattoo_repo
        .get_tattoo_request(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("TattooRequest", id))?;

    apply_status_update(&mut request.status, &mut request.admin_notes, update)?;
    request.updated_at = chrono::Utc::now();
    state.tattoo_repo.update_tattoo_request(&request).await?;

    tracing::info!(request_id = %id, status = %request.status, "Updated tattoo request");

    Ok(Json(request))
}

/// Delete a tattoo request (DELETE /api/admin/tattoo-requests/{id}).
pub async fn delete_tattoo_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.tattoo_repo.delete_tattoo_request(id).await?;

    tracing::info!(request_id = %id, "Deleted tattoo request");

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Flash tattoo requests
// ============================================================================

/// Ask for a flash design (POST /api/flash-tattoo-requests).
pub async fn create_flash_request(
    State(state): State<AppState>,
    payload: Result<Json<CreateFlashTattooRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let request = json_body(payload)?;

    let prestation = state
        .prestation_repo
        .get_prestation(request.prestation_id)
        .await?
        .ok_or_else(|| CatalogError::UnknownPrestation(request.prestation_id.to_string()))?;
    let service = state
        .service_repo
        .get_service(prestation.service_id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Service", prestation.service_id))?;

    validate_flash_request(&request, &prestation, &service)?;
    if !prestation.active {
        return Err(CatalogError::InactivePrestation(prestation.id.to_string()).into());
    }

    let customer = find_or_create_customer(&state, request.customer.clone()).await?;
    let flash = request.into_flash_request(customer.id);
    state.flash_repo.create_flash_request(&flash).await?;

    tracing::info!(
        request_id = %flash.id,
        prestation_id = %flash.prestation_id,
        user_id = %customer.id,
        "Received flash tattoo request"
    );

    Ok((StatusCode::CREATED, Json(flash)))
}

/// List flash requests, newest first (GET /api/admin/flash-tattoo-requests).
pub async fn list_flash_requests(
    State(state): State<AppState>,
) -> Result<Json<Vec<FlashTattooRequest>>, AppError> {
    Ok(Json(state.flash_repo.list_flash_requests().await?))
}

/// Follow up a flash request (PATCH /api/admin/flash-tattoo-requests/{id}).
pub async fn update_flash_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<UpdateRequestStatus>, JsonRejection>,
) -> Result<Json<FlashTattooRequest>, AppError> {
    let update = json_body(payload)?;

    let mut request = state
        .flash_repo
        .get_flash_request(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("FlashTattooRequest", id))?;

    apply_status_update(&mut request.status, &mut request.admin_notes, update)?;
    request.updated_at = chrono::Utc::now();
    state.flash_repo.update_flash_request(&request).await?;

    tracing::info!(request_id = %id, status = %request.status, "Updated flash tattoo request");

    Ok(Json(request))
}

/// Delete a flash request (DELETE /api/admin/flash-tattoo-requests/{id}).
pub async fn delete_flash_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.flash_repo.delete_flash_request(id).await?;

    tracing::info!(request_id = %id, "Deleted flash tattoo request");

    Ok(StatusCode::NO_CONTENT)
}
