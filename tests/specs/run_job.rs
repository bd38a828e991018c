// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run-from-upload specs: upload an input script, get an artifact back.

use crate::prelude::*;
use axum::http::StatusCode;

/// A 2 KB dump lands in the inline tier and fetches back identical.
#[tokio::test]
async fn small_run_persists_inline_and_fetches_back() {
    // Engine writes a ~2 KB trajectory regardless of input.
    let service = Service::with_engine(
        "i=0; while [ $i -lt 128 ]; do echo 'ITEM: TIMESTEP xxxxxxx' >> dump.out.lammpstrj; i=$((i+1)); done",
    );

    let (status, body) = service.upload("/api/run", "in.melt", b"units lj\nrun 100\n").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["tier"], "inline");
    assert_eq!(body["filename"], "dump.out.lammpstrj");
    let size = body["size"].as_u64().unwrap();
    assert!(size > 1024, "expected ~2 KB artifact, got {size} bytes");

    let id = body["artifactId"].as_str().unwrap().to_string();
    let (status, fetched) = service.get(&format!("/api/trajectories/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["tier"], "inline");
    assert_eq!(fetched["originalInputFile"], "in.melt");
    assert_eq!(fetched["content"].as_str().unwrap().len() as u64, size);

    assert_eq!(service.workspace_count(), 0, "workspace must not survive the run");
}

/// Nonzero engine exit surfaces as a 500 with the captured stderr, and
/// the workspace no longer exists on disk.
#[tokio::test]
async fn failing_run_returns_500_with_stderr_and_cleans_up() {
    let service = Service::with_engine("echo 'ERROR: Lost atoms: original 4000' >&2; exit 1");

    let (status, body) = service.upload("/api/run", "in.melt", b"run 100\n").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(body["stderr"].as_str().unwrap().contains("Lost atoms"));

    assert_eq!(service.workspace_count(), 0, "workspace must be released on failure");
}

/// A run that succeeds but produces nothing recognizable is its own
/// failure kind, not an execution failure.
#[tokio::test]
async fn run_with_no_output_reports_missing_artifact() {
    let service = Service::with_engine("exit 0");

    let (status, body) = service.upload("/api/run", "in.melt", b"units lj\n").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("no recognizable output"));
    assert!(body.get("stderr").is_none());

    assert_eq!(service.workspace_count(), 0);
}

/// Missing multipart file field is a validation error.
#[tokio::test]
async fn run_without_upload_is_rejected() {
    let service = Service::with_engine("exit 0");

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/run")
        .header("content-type", "multipart/form-data; boundary=empty-boundary")
        .body(axum::body::Body::from("--empty-boundary--\r\n"))
        .unwrap();
    let (status, body) = service.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Input file is required");
}
