// Copyright 2025 cvbench Contributors
// SPDX-License-Identifier: Apache-2.0

//! API error type and its HTTP mapping.
//!
//! Client errors carry their message to the caller. Server errors are logged
//! in full and answered with a generic message, so file paths and I/O
//! details never leave the process.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cvbench_records::{RecordError, StoreError};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Message returned for every server-side failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Failed to save benchmark data";

/// Errors surfaced by API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request was rejected before touching the data directory.
    #[error("{0}")]
    InvalidInput(String),

    /// The append store failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Anything else that went wrong server-side.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RecordError> for ApiError {
    fn from(err: RecordError) -> Self {
        ApiError::InvalidInput(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("Blocking task failed: {}", err))
    }
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::InvalidInput(message) => message.clone(),
            other => {
                error!(error = %other, "Request failed");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
