//! HTTP error mapping.
//!
//! Only two kinds reach the client: a missing record (404) and a failed
//! operation, which is 500 for reads and 400 for writes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use campusspot_core::error::CampusError;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// `{ "message": ... }` body used for acknowledgements and errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Write,
}

#[derive(Debug)]
pub struct ApiError {
    operation: Operation,
    error: CampusError,
}

impl ApiError {
    pub fn read(error: impl Into<CampusError>) -> Self {
        Self {
            operation: Operation::Read,
            error: error.into(),
        }
    }

    pub fn write(error: impl Into<CampusError>) -> Self {
        Self {
            operation: Operation::Write,
            error: error.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match (&self.error, self.operation) {
            (CampusError::NotFound { .. }, _) => StatusCode::NOT_FOUND,
            (_, Operation::Read) => StatusCode::INTERNAL_SERVER_ERROR,
            (_, Operation::Write) => StatusCode::BAD_REQUEST,
        }
    }

    fn message(&self) -> String {
        match &self.error {
            CampusError::NotFound { entity, .. } => format!("{entity} not found"),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self.error {
            CampusError::NotFound { .. } | CampusError::Validation { .. } => {
                warn!(status = status.as_u16(), error = %self.error, "Request failed");
            }
            _ => {
                error!(status = status.as_u16(), error = %self.error, "Request failed");
            }
        }

        (status, Json(Message::new(self.message()))).into_response()
    }
}
