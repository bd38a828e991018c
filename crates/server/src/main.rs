// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! trajd: HTTP daemon for the simulation trajectory service.

use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use traj_engine::{EngineResolver, JobRunner, WorkspaceManager};
use traj_server::{env, router, AppState};
use traj_storage::ArtifactStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let data_dir = env::data_dir()?;

    let resolver = Arc::new(match env::engine_candidates() {
        Some(candidates) => EngineResolver::with_candidates(candidates),
        None => EngineResolver::new(),
    });
    let workspaces = match env::workspace_root() {
        Some(root) => WorkspaceManager::with_root(root),
        None => WorkspaceManager::new(),
    };
    let runner = Arc::new(
        JobRunner::new(resolver.clone())
            .with_workspaces(workspaces)
            .with_run_timeout(env::run_timeout()),
    );
    let store = Arc::new(ArtifactStore::new(&data_dir));

    let state = AppState {
        resolver,
        runner,
        store,
        auth_token: env::auth_token().map(Arc::from),
    };

    let app = router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any));

    let addr = format!("0.0.0.0:{}", env::port());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, data_dir = %data_dir.display(), "trajd listening");

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutdown signal received");
    }
}
