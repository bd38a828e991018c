// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! traj-server: HTTP surface for the trajectory service
//!
//! Composition root: owns the shared resolver/runner/store singletons and
//! assembles the router used by both the `trajd` binary and the tests.

pub mod auth;
pub mod env;
pub mod error;
pub mod routes;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use traj_engine::{EngineResolver, JobRunner};
use traj_storage::ArtifactStore;

pub use error::ApiError;

/// Upload ceiling. Blob-tier artifacts are buffered in memory end to end,
/// so this is also the practical artifact size limit.
pub const MAX_UPLOAD_BYTES: usize = 256 * 1024 * 1024;

/// Shared service state, injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<EngineResolver>,
    pub runner: Arc<JobRunner>,
    pub store: Arc<ArtifactStore>,
    /// When set, `/api` routes require this bearer token.
    pub auth_token: Option<Arc<str>>,
}

/// Build the full application router.
///
/// Single point of entry for all routes, used by the binary and by
/// integration tests.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/run", post(routes::run_from_upload))
        .route("/trajectories", post(routes::store_raw_upload))
        .route("/trajectories/{id}", get(routes::fetch_artifact))
        .layer(middleware::from_fn_with_state(state.clone(), auth::require_token));

    Router::new()
        .route("/", get(routes::service_info))
        .route("/health", get(routes::health))
        .nest("/api", api)
        .fallback(routes::not_found)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
