//! CampusSpot server — REST API for browsing, adding, editing and
//! reviewing campus study spots.
//!
//! # Endpoints
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | GET | `/api/spots` | 200, all spots, newest first |
//! | POST | `/api/spots` | 201, stored spot |
//! | GET | `/api/spots/{id}` | 200, spot |
//! | PUT | `/api/spots/{id}` | 200, ack message |
//! | DELETE | `/api/spots/{id}` | 200, ack message |
//! | GET | `/api/reviews/spot/{spot_id}` | 200, reviews, newest first |
//! | POST | `/api/reviews` | 201, stored review |
//! | GET | `/api/health` | 200 |
//!
//! Errors are `{ "message": ... }`: 404 when the spot does not exist,
//! otherwise 500 for reads and 400 for writes.
//!
//! # Configuration
//!
//! Read from the environment, see [`config::Config`].
//!
//! ```sh
//! SERVER_PORT=8080 SURREAL_URL=127.0.0.1:8000 campusspot serve
//! campusspot seed --spots 100 --reviews 1000
//! ```
use std::time::Duration;

use axum::{
    Router,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
};
use campusspot_core::repository::{ReviewRepository, SpotRepository};
use campusspot_db::{
    DbError, DbManager,
    repository::{SurrealReviewRepository, SurrealSpotRepository},
};
use thiserror::Error;
use tokio::{
    net::TcpListener,
    signal::{
        ctrl_c,
        unix::{SignalKind, signal},
    },
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

pub mod config;
pub mod error;
pub mod routes;
pub mod seed;
pub mod state;

use config::{Config, ConfigError};
use state::AppState;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Database(#[from] DbError),

    #[error(transparent)]
    Campus(#[from] campusspot_core::error::CampusError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn cors_layer(config: &Config) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(config.allowed_origins.clone()))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(60 * 60))
}

/// The full application router over any pair of stores.
pub fn app<S, R>(state: AppState<S, R>, cors: CorsLayer) -> Router
where
    S: SpotRepository + 'static,
    R: ReviewRepository + 'static,
{
    routes::api::<S, R>()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn connect(config: &Config) -> Result<DbManager, ServerError> {
    info!("Initializing database...");
    Ok(DbManager::connect(&config.db).await?)
}

pub async fn start_server(config: Config) -> Result<(), ServerError> {
    let db = connect(&config).await?;

    let state = AppState::new(
        SurrealSpotRepository::new(db.client()),
        SurrealReviewRepository::new(db.client()),
    );

    info!("Starting server...");
    let router = app(state, cors_layer(&config));

    let address = config.address();
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

pub async fn run_seed(
    config: Config,
    spot_count: usize,
    review_count: usize,
) -> Result<seed::SeedSummary, ServerError> {
    let db = connect(&config).await?;

    let spots = SurrealSpotRepository::new(db.client());
    let reviews = SurrealReviewRepository::new(db.client());

    let summary = seed::seed(&spots, &reviews, spot_count, review_count).await?;
    info!(
        spots = summary.spots,
        reviews = summary.reviews,
        "Data generation complete"
    );

    Ok(summary)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
