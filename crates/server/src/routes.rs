// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request handlers for the trajectory service.

use crate::error::ApiError;
use crate::AppState;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};
use traj_core::ArtifactId;
use traj_engine::RunError;

/// A decoded multipart file upload.
struct Upload {
    filename: String,
    bytes: Vec<u8>,
}

/// GET `/`: service identity.
pub async fn service_info() -> Json<Value> {
    Json(json!({ "ok": true, "name": "trajd", "version": env!("CARGO_PKG_VERSION") }))
}

/// GET `/health`: reports whether a simulation engine is installed.
pub async fn health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    match state.resolver.resolve().await {
        Ok(command) => Ok(Json(json!({ "engineInstalled": true, "command": command }))),
        Err(e) => Err(RunError::from(e).into()),
    }
}

/// POST `/api/run`: run a simulation from an uploaded input script and
/// persist the produced artifact.
pub async fn run_from_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let upload = extract_file(multipart).await?;

    let outcome = state.runner.run(&upload.bytes, &upload.filename).await?;
    let descriptor = state
        .store
        .put(&outcome.filename, outcome.content, Some(upload.filename))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "simulation completed",
            "artifactId": descriptor.id,
            "filename": descriptor.filename,
            "tier": descriptor.tier,
            "size": descriptor.size,
        })),
    ))
}

/// POST `/api/trajectories`: store a pre-computed artifact directly.
pub async fn store_raw_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let upload = extract_file(multipart).await?;
    let content = String::from_utf8(upload.bytes)
        .map_err(|_| ApiError::Validation("file content must be UTF-8 text".to_string()))?;

    let descriptor = state.store.put(&upload.filename, content, None).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "artifactId": descriptor.id,
            "tier": descriptor.tier,
            "size": descriptor.size,
        })),
    ))
}

/// GET `/api/trajectories/{id}`: fetch a stored artifact.
pub async fn fetch_artifact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = ArtifactId::parse(&id)?;
    let artifact = state.store.get(&id).await?;

    Ok(Json(json!({
        "success": true,
        "filename": artifact.filename,
        "content": artifact.content,
        "originalInputFile": artifact.original_input_file,
        "createdAt": artifact.created_at,
        "tier": artifact.tier,
    })))
}

/// Fallback for unknown routes.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "success": false, "message": "Not found" })),
    )
}

/// Pull the `file` field out of a multipart body.
async fn extract_file(mut multipart: Multipart) -> Result<Upload, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field
            .file_name()
            .map(sanitize_filename)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "input.in".to_string());
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::Validation(format!("failed to read upload: {e}")))?
            .to_vec();
        return Ok(Upload { filename, bytes });
    }
    Err(ApiError::Validation("Input file is required".to_string()))
}

/// Keep only the final path component of a client-supplied filename.
fn sanitize_filename(name: &str) -> String {
    std::path::Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
