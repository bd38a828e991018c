// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the server crate.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvError {
    #[error("cannot determine data directory (set TRAJ_DATA_DIR or HOME)")]
    NoDataDir,
}

/// Listen port (default 3000).
pub fn port() -> u16 {
    std::env::var("TRAJ_PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000)
}

/// Resolve data directory: TRAJ_DATA_DIR > XDG_DATA_HOME/trajd > ~/.local/share/trajd
pub fn data_dir() -> Result<PathBuf, EnvError> {
    if let Ok(dir) = std::env::var("TRAJ_DATA_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        return Ok(PathBuf::from(xdg).join("trajd"));
    }
    let home = std::env::var("HOME").map_err(|_| EnvError::NoDataDir)?;
    Ok(PathBuf::from(home).join(".local/share/trajd"))
}

/// Workspace root override. Defaults to the platform temp directory.
pub fn workspace_root() -> Option<PathBuf> {
    std::env::var("TRAJ_WORKSPACE_DIR").ok().map(PathBuf::from)
}

/// Simulation run deadline (default 10 minutes, configurable via
/// `TRAJ_RUN_TIMEOUT_MS`).
pub fn run_timeout() -> Duration {
    std::env::var("TRAJ_RUN_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(600))
}

/// Engine executable override: comma-separated candidate list probed in
/// order instead of the built-in names.
pub fn engine_candidates() -> Option<Vec<String>> {
    let raw = std::env::var("TRAJ_ENGINE_CMD").ok()?;
    let candidates: Vec<String> =
        raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect();
    if candidates.is_empty() {
        None
    } else {
        Some(candidates)
    }
}

/// Bearer token required on `/api` routes. Unset means open access.
pub fn auth_token() -> Option<String> {
    std::env::var("TRAJ_AUTH_TOKEN").ok().filter(|s| !s.is_empty())
}
