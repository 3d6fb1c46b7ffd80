use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use salonbook_core::booking::{validate_review, CreateReviewRequest, Review, UpdateReviewRequest};
use salonbook_core::storage::RepositoryError;

use super::{json_body, AppError};
use crate::state::AppState;

/// Published reviews, newest first (GET /api/reviews).
pub async fn list_published_reviews(
    State(state): State<AppState>,
) -> Result<Json<Vec<Review>>, AppError> {
    Ok(Json(state.review_repo.list_reviews(true).await?))
}

/// Leave a review (POST /api/reviews). It stays hidden until published.
pub async fn create_review(
    State(state): State<AppState>,
    payload: Result<Json<CreateReviewRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let review = json_body(payload)?.into_review();
    validate_review(&review)?;

    state.review_repo.create_review(&review).await?;

    tracing::info!(review_id = %review.id, rating = review.rating, "Received review");

    Ok((StatusCode::CREATED, Json(review)))
}

/// Every review, published or not (GET /api/admin/reviews).
pub async fn list_all_reviews(
    State(state): State<AppState>,
) -> Result<Json<Vec<Review>>, AppError> {
    Ok(Json(state.review_repo.list_reviews(false).await?))
}

/// Publish, hide or edit a review (PATCH /api/admin/reviews/{id}).
pub async fn update_review(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<UpdateReviewRequest>, JsonRejection>,
) -> Result<Json<Review>, AppError> {
    let request = json_body(payload)?;

    let mut review = state
        .review_repo
        .get_review(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Review", id))?;

    request.apply_to(&mut review);
    validate_review(&review)?;
    state.review_repo.update_review(&review).await?;

    tracing::info!(review_id = %id, published = review.published, "Updated review");

    Ok(Json(review))
}

/// Delete a review (DELETE /api/admin/reviews/{id}).
pub async fn delete_review(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.review_repo.delete_review(id).await?;

    tracing::info!(review_id = %id, "Deleted review");

    Ok(StatusCode::NO_CONTENT)
}
