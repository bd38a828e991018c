// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-job execution pipeline.
//!
//! A job moves through: workspace acquired → input written → command
//! resolved → engine executed → artifact discovered → artifact read →
//! workspace released. Any failure skips straight to release, carrying its
//! error kind; retries are a caller concern.

use crate::discover::{DiscoverArtifact, SuffixDiscovery};
use crate::resolver::{EngineResolver, ResolveError};
use crate::subprocess::{run_with_timeout, SubprocessError, DEFAULT_RUN_TIMEOUT};
use crate::workspace::{Workspace, WorkspaceError, WorkspaceManager};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use traj_core::JobId;

/// Ways a single job can fail. Each kind maps to a distinct user-visible
/// condition; none is retried internally.
#[derive(Debug, Error)]
pub enum RunError {
    /// Configuration-level: no engine installed at all.
    #[error(transparent)]
    Engine(#[from] ResolveError),
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),
    #[error("failed to write input file {filename}: {source}")]
    InputWrite {
        filename: String,
        #[source]
        source: std::io::Error,
    },
    /// The engine exited nonzero; stderr carries its diagnostics.
    #[error("simulation exited with status {status}: {stderr}")]
    ExecutionFailed { status: i32, stderr: String },
    #[error("simulation timed out after {0:?}")]
    ExecutionTimeout(Duration),
    /// Execution succeeded but nothing in the workspace looked like a
    /// result. Not retryable; distinct from execution failure.
    #[error("simulation produced no recognizable output artifact")]
    ArtifactNotFound,
    #[error("failed to read output artifact {filename}: {source}")]
    ArtifactReadFailed {
        filename: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result of a successful run: the discovered artifact, fully in memory.
#[derive(Debug)]
pub struct RunOutcome {
    /// Filename of the discovered artifact within the workspace
    pub filename: String,
    /// Full artifact content
    pub content: String,
    /// Captured engine stdout, for diagnostics
    pub stdout: String,
}

/// Executes one simulation job per call inside an isolated workspace.
pub struct JobRunner {
    resolver: Arc<EngineResolver>,
    workspaces: WorkspaceManager,
    discovery: Arc<dyn DiscoverArtifact>,
    run_timeout: Duration,
}

impl JobRunner {
    pub fn new(resolver: Arc<EngineResolver>) -> Self {
        Self {
            resolver,
            workspaces: WorkspaceManager::new(),
            discovery: Arc::new(SuffixDiscovery),
            run_timeout: DEFAULT_RUN_TIMEOUT,
        }
    }

    pub fn with_workspaces(mut self, workspaces: WorkspaceManager) -> Self {
        self.workspaces = workspaces;
        self
    }

    pub fn with_discovery(mut self, discovery: Arc<dyn DiscoverArtifact>) -> Self {
        self.discovery = discovery;
        self
    }

    pub fn with_run_timeout(mut self, timeout: Duration) -> Self {
        self.run_timeout = timeout;
        self
    }

    /// Run the engine against `input` and return the discovered artifact.
    ///
    /// The workspace is released on every exit path; a cleanup fault is
    /// logged inside the manager and never surfaces here.
    pub async fn run(&self, input: &[u8], input_filename: &str) -> Result<RunOutcome, RunError> {
        let job = JobId::new();
        let workspace = self.workspaces.acquire().await?;
        tracing::info!(
            job = %job,
            workspace = %workspace.path().display(),
            input = input_filename,
            "job started"
        );

        // Keep the fallible pipeline in its own future so release is
        // unconditional.
        let result = self.run_in(&workspace, input, input_filename).await;
        self.workspaces.release(workspace).await;

        match &result {
            Ok(outcome) => tracing::info!(
                job = %job,
                artifact = %outcome.filename,
                bytes = outcome.content.len(),
                "job completed"
            ),
            Err(e) => tracing::warn!(job = %job, error = %e, "job failed"),
        }
        result
    }

    async fn run_in(
        &self,
        workspace: &Workspace,
        input: &[u8],
        input_filename: &str,
    ) -> Result<RunOutcome, RunError> {
        // Strip directory components so the input lands inside the workspace.
        let input_name = sanitize_filename(input_filename);
        let input_path = workspace.path().join(&input_name);
        tokio::fs::write(&input_path, input)
            .await
            .map_err(|source| RunError::InputWrite { filename: input_name.clone(), source })?;

        let command = self.resolver.resolve().await?;

        let mut cmd = Command::new(command);
        cmd.arg("-in").arg(&input_name).current_dir(workspace.path());
        let output = match run_with_timeout(cmd, self.run_timeout, "simulation run").await {
            Ok(output) => output,
            Err(SubprocessError::TimedOut { .. }) => {
                return Err(RunError::ExecutionTimeout(self.run_timeout));
            }
            Err(SubprocessError::Spawn { source, .. }) => {
                return Err(RunError::ExecutionFailed {
                    status: -1,
                    stderr: format!("failed to start simulation: {source}"),
                });
            }
        };

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if !output.status.success() {
            return Err(RunError::ExecutionFailed {
                status: output.status.code().unwrap_or(-1),
                stderr,
            });
        }
        if !stderr.is_empty() {
            tracing::warn!(stderr = %stderr, "simulation stderr");
        }

        let found =
            self.discovery.discover(workspace.path(), &input_name).await.map_err(|source| {
                RunError::ArtifactReadFailed {
                    filename: workspace.path().display().to_string(),
                    source,
                }
            })?;
        let Some(path) = found else {
            return Err(RunError::ArtifactNotFound);
        };

        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| RunError::ArtifactReadFailed { filename: filename.clone(), source })?;

        Ok(RunOutcome {
            filename,
            content,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}

fn sanitize_filename(name: &str) -> String {
    Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "input.in".to_string())
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
