// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request-boundary error mapping.
//!
//! Every core error propagates here unmodified in kind and becomes a
//! structured JSON envelope: a success flag, a human-readable message,
//! and for execution failures the captured diagnostic stream. Never a raw
//! backtrace.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use traj_core::InvalidIdentifier;
use traj_engine::RunError;
use traj_storage::StoreError;

/// Errors surfaced at the request boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed request input.
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    InvalidId(#[from] InvalidIdentifier),
    #[error(transparent)]
    Run(#[from] RunError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut body = json!({ "success": false, "message": self.to_string() });

        match &self {
            ApiError::Run(RunError::ExecutionFailed { stderr, .. }) => {
                tracing::error!(error = %self, "simulation execution failed");
                body["stderr"] = json!(stderr);
            }
            ApiError::Run(RunError::Engine(_)) => {
                tracing::error!(error = %self, "engine resolution failed");
                body["engineInstalled"] = json!(false);
                body["message"] = json!(format!(
                    "{self}; install the simulation engine or use a deployment that bundles it"
                ));
            }
            ApiError::Run(RunError::ArtifactNotFound) => {
                // Execution succeeded; keep this distinguishable from an
                // engine failure in the logs.
                tracing::error!(error = %self, "no output artifact after successful run");
            }
            ApiError::Validation(_)
            | ApiError::InvalidId(_)
            | ApiError::Store(StoreError::NotFound) => {
                tracing::warn!(error = %self, "request rejected");
            }
            _ => {
                tracing::error!(error = %self, "request failed");
            }
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
