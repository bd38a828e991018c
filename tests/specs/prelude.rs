// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for the end-to-end specs.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use std::os::unix::fs::PermissionsExt;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use traj_engine::{EngineResolver, JobRunner, WorkspaceManager};
use traj_server::{router, AppState};
use traj_storage::ArtifactStore;

/// A full service instance on throwaway directories with a stub engine.
pub struct Service {
    _bin: tempfile::TempDir,
    _data: tempfile::TempDir,
    workspaces: tempfile::TempDir,
    state: AppState,
}

impl Service {
    /// Spin up a service whose engine behaves per `engine_body` when
    /// invoked as `engine -in <file>` (the `-h` probe always succeeds).
    pub fn with_engine(engine_body: &str) -> Self {
        let bin = tempfile::tempdir().unwrap();
        let engine = bin.path().join("fake-lmp");
        let script =
            format!("#!/bin/sh\nif [ \"$1\" = \"-h\" ]; then exit 0; fi\n{engine_body}\n");
        std::fs::write(&engine, script).unwrap();
        let mut perms = std::fs::metadata(&engine).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&engine, perms).unwrap();

        let data = tempfile::tempdir().unwrap();
        let workspaces = tempfile::tempdir().unwrap();

        let resolver =
            Arc::new(EngineResolver::with_candidates([engine.display().to_string()]));
        let runner = Arc::new(
            JobRunner::new(resolver.clone())
                .with_workspaces(WorkspaceManager::with_root(workspaces.path()))
                .with_run_timeout(Duration::from_secs(10)),
        );
        let store = Arc::new(ArtifactStore::new(data.path()));

        let state = AppState { resolver, runner, store, auth_token: None };
        Self { _bin: bin, _data: data, workspaces, state }
    }

    /// Number of workspace directories currently on disk.
    pub fn workspace_count(&self) -> usize {
        std::fs::read_dir(self.workspaces.path()).unwrap().count()
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = router(self.state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn upload(&self, uri: &str, filename: &str, content: &[u8]) -> (StatusCode, Value) {
        self.send(multipart_request(uri, filename, content)).await
    }
}

const BOUNDARY: &str = "traj-spec-boundary";

pub fn multipart_request(uri: &str, filename: &str, content: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; \
             filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap()
}
