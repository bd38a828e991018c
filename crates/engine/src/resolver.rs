// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Simulation engine discovery.
//!
//! Deployments install the engine under different executable names; the
//! resolver probes a fixed candidate list once per process and caches the
//! first name that answers a help request.

use crate::subprocess::{run_with_timeout, SubprocessError, HELP_PROBE_TIMEOUT};
use thiserror::Error;
use tokio::process::Command;
use tokio::sync::OnceCell;

/// Executable names probed for, in order.
pub const ENGINE_CANDIDATES: &[&str] = &["lmp", "lmp_serial", "lmp_mpi"];

/// Exit status the engine documents for "help requested, no run performed".
const HELP_EXIT_CODE: i32 = 1;

/// No candidate executable answered the probe.
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    #[error("no simulation engine found (tried: {tried})")]
    EngineNotFound { tried: String },
}

/// Finds which installed executable runs the simulation engine.
///
/// Resolution happens lazily on the first job and is memoized for the
/// process lifetime; the cell serializes concurrent first callers so the
/// probe sequence runs at most once.
pub struct EngineResolver {
    candidates: Vec<String>,
    resolved: OnceCell<String>,
}

impl EngineResolver {
    pub fn new() -> Self {
        Self::with_candidates(ENGINE_CANDIDATES.iter().map(|s| s.to_string()))
    }

    /// Override the probe list (configuration and tests).
    pub fn with_candidates(candidates: impl IntoIterator<Item = String>) -> Self {
        Self { candidates: candidates.into_iter().collect(), resolved: OnceCell::new() }
    }

    /// Resolve the engine command name, probing at most once per process.
    pub async fn resolve(&self) -> Result<&str, ResolveError> {
        self.resolved.get_or_try_init(|| self.probe_candidates()).await.map(String::as_str)
    }

    async fn probe_candidates(&self) -> Result<String, ResolveError> {
        for candidate in &self.candidates {
            if probe(candidate).await {
                tracing::info!(command = %candidate, "resolved simulation engine");
                return Ok(candidate.clone());
            }
            tracing::debug!(command = %candidate, "engine candidate rejected");
        }
        Err(ResolveError::EngineNotFound { tried: self.candidates.join(", ") })
    }
}

impl Default for EngineResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Cheap liveness probe: ask the candidate for its help output.
///
/// Exit 0 and the documented help status both count as present; a spawn
/// error means the binary is absent, any other status means something
/// that is not the engine answered.
async fn probe(candidate: &str) -> bool {
    let mut cmd = Command::new(candidate);
    cmd.arg("-h");
    match run_with_timeout(cmd, HELP_PROBE_TIMEOUT, "engine help probe").await {
        Ok(output) => output.status.success() || output.status.code() == Some(HELP_EXIT_CODE),
        Err(SubprocessError::Spawn { .. }) | Err(SubprocessError::TimedOut { .. }) => false,
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
