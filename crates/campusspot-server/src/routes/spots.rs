//! Spot endpoints.
//!
//! ```text
//! GET    /api/spots       -> list
//! POST   /api/spots       -> create
//! GET    /api/spots/{id}  -> get
//! PUT    /api/spots/{id}  -> update
//! DELETE /api/spots/{id}  -> delete
//! ```

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use campusspot_core::error::CampusError;
use campusspot_core::models::spot::{CreateSpot, Spot, UpdateSpot};
use campusspot_core::repository::{ReviewRepository, SpotRepository};
use tracing::info;
use uuid::Uuid;

use crate::error::{ApiError, Message};
use crate::state::AppState;

pub fn router<S, R>() -> Router<AppState<S, R>>
where
    S: SpotRepository + 'static,
    R: ReviewRepository + 'static,
{
    Router::new()
        .route("/api/spots", get(list::<S, R>).post(create::<S, R>))
        .route(
            "/api/spots/{id}",
            get(get_one::<S, R>)
                .put(update::<S, R>)
                .delete(delete::<S, R>),
        )
}

fn parse_id(raw: &str) -> Result<Uuid, CampusError> {
    Uuid::parse_str(raw)
        .map_err(|e| CampusError::validation(format!("invalid spot id {raw:?}: {e}")))
}

async fn list<S, R>(State(state): State<AppState<S, R>>) -> Result<Json<Vec<Spot>>, ApiError>
where
    S: SpotRepository,
    R: ReviewRepository,
{
    let spots = state.spots.list().await.map_err(ApiError::read)?;
    Ok(Json(spots))
}

async fn create<S, R>(
    State(state): State<AppState<S, R>>,
    payload: Result<Json<CreateSpot>, JsonRejection>,
) -> Result<(StatusCode, Json<Spot>), ApiError>
where
    S: SpotRepository,
    R: ReviewRepository,
{
    let Json(input) =
        payload.map_err(|e| ApiError::write(CampusError::validation(e.body_text())))?;

    let spot = state.spots.create(input).await.map_err(ApiError::write)?;
    info!(spot_id = %spot.id, "Spot created");

    Ok((StatusCode::CREATED, Json(spot)))
}

async fn get_one<S, R>(
    State(state): State<AppState<S, R>>,
    Path(id): Path<String>,
) -> Result<Json<Spot>, ApiError>
where
    S: SpotRepository,
    R: ReviewRepository,
{
    let id = parse_id(&id).map_err(ApiError::read)?;
    let spot = state.spots.get_by_id(id).await.map_err(ApiError::read)?;
    Ok(Json(spot))
}

async fn update<S, R>(
    State(state): State<AppState<S, R>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateSpot>, JsonRejection>,
) -> Result<Json<Message>, ApiError>
where
    S: SpotRepository,
    R: ReviewRepository,
{
    let id = parse_id(&id).map_err(ApiError::write)?;
    let Json(input) =
        payload.map_err(|e| ApiError::write(CampusError::validation(e.body_text())))?;

    state
        .spots
        .update(id, input)
        .await
        .map_err(ApiError::write)?;
    info!(spot_id = %id, "Spot updated");

    Ok(Json(Message::new("Spot updated successfully")))
}

async fn delete<S, R>(
    State(state): State<AppState<S, R>>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ApiError>
where
    S: SpotRepository,
    R: ReviewRepository,
{
    let id = parse_id(&id).map_err(ApiError::write)?;

    state.spots.delete(id).await.map_err(ApiError::write)?;
    info!(spot_id = %id, "Spot deleted");

    Ok(Json(Message::new("Spot deleted successfully")))
}
