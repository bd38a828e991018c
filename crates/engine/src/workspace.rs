// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-job ephemeral workspace directories.

use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use traj_core::WorkspaceId;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("failed to create workspace dir {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// An isolated ephemeral directory, exclusively owned by one job.
///
/// Obtained from [`WorkspaceManager::acquire`] and handed back to
/// [`WorkspaceManager::release`], which consumes it: release cannot
/// happen twice and the directory cannot be used after release.
#[derive(Debug)]
pub struct Workspace {
    id: WorkspaceId,
    path: PathBuf,
    created: Instant,
}

impl Workspace {
    pub fn id(&self) -> &WorkspaceId {
        &self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Allocates and destroys per-job workspace directories.
///
/// Directory names are generated [`WorkspaceId`]s, so concurrent jobs can
/// never collide on a path.
#[derive(Debug, Clone)]
pub struct WorkspaceManager {
    root: PathBuf,
}

impl WorkspaceManager {
    /// Manager rooted at the platform temp directory.
    pub fn new() -> Self {
        Self { root: std::env::temp_dir() }
    }

    /// Manager rooted at an explicit directory (configuration and tests).
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a uniquely-named workspace directory.
    pub async fn acquire(&self) -> Result<Workspace, WorkspaceError> {
        let id = WorkspaceId::new();
        let path = self.root.join(id.as_str());
        tokio::fs::create_dir_all(&path)
            .await
            .map_err(|source| WorkspaceError::Create { path: path.clone(), source })?;
        tracing::debug!(workspace = %id, path = %path.display(), "workspace created");
        Ok(Workspace { id, path, created: Instant::now() })
    }

    /// Recursively remove a workspace directory.
    ///
    /// Removal failure is logged and swallowed: a cleanup fault must not
    /// mask the job's primary result or error.
    pub async fn release(&self, workspace: Workspace) {
        let elapsed_ms = workspace.created.elapsed().as_millis() as u64;
        if let Err(e) = tokio::fs::remove_dir_all(&workspace.path).await {
            tracing::warn!(
                path = %workspace.path.display(),
                error = %e,
                "failed to remove workspace directory (best-effort)"
            );
            return;
        }
        tracing::debug!(workspace = %workspace.id, elapsed_ms, "workspace released");
    }
}

impl Default for WorkspaceManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "workspace_tests.rs"]
mod tests;
