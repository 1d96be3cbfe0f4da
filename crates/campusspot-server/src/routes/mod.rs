//! HTTP routes.

use axum::{Json, Router, routing::get};
use campusspot_core::repository::{ReviewRepository, SpotRepository};
use serde_json::{Value, json};

use crate::state::AppState;

pub mod reviews;
pub mod spots;

/// All API routes, still waiting for their state.
pub fn api<S, R>() -> Router<AppState<S, R>>
where
    S: SpotRepository + 'static,
    R: ReviewRepository + 'static,
{
    Router::new()
        .route("/api/health", get(health))
        .merge(spots::router())
        .merge(reviews::router())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
