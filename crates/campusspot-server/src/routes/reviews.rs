//! Review endpoints.
//!
//! ```text
//! GET  /api/reviews/spot/{spot_id}  -> list for spot
//! POST /api/reviews                 -> create
//! ```

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post},
};
use campusspot_core::error::CampusError;
use campusspot_core::models::review::{CreateReview, Review};
use campusspot_core::repository::{ReviewRepository, SpotRepository};
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

pub fn router<S, R>() -> Router<AppState<S, R>>
where
    S: SpotRepository + 'static,
    R: ReviewRepository + 'static,
{
    Router::new()
        .route("/api/reviews", post(create::<S, R>))
        .route("/api/reviews/spot/{spot_id}", get(list_by_spot::<S, R>))
}

async fn list_by_spot<S, R>(
    State(state): State<AppState<S, R>>,
    Path(spot_id): Path<String>,
) -> Result<Json<Vec<Review>>, ApiError>
where
    S: SpotRepository,
    R: ReviewRepository,
{
    let reviews = state
        .reviews
        .list_by_spot(&spot_id)
        .await
        .map_err(ApiError::read)?;
    Ok(Json(reviews))
}

async fn create<S, R>(
    State(state): State<AppState<S, R>>,
    payload: Result<Json<CreateReview>, JsonRejection>,
) -> Result<(StatusCode, Json<Review>), ApiError>
where
    S: SpotRepository,
    R: ReviewRepository,
{
    let Json(input) =
        payload.map_err(|e| ApiError::write(CampusError::validation(e.body_text())))?;
    input.validate().map_err(ApiError::write)?;

    let review = state.reviews.create(input).await.map_err(ApiError::write)?;
    info!(review_id = %review.id, spot_id = %review.spot_id, "Review created");

    Ok((StatusCode::CREATED, Json(review)))
}
