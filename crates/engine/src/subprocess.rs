// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess execution with buffered output and a hard deadline.

use std::process::{Output, Stdio};
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

/// Deadline for the cheap `-h` engine probe.
pub const HELP_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Default deadline for a full simulation run.
pub const DEFAULT_RUN_TIMEOUT: Duration = Duration::from_secs(600);

/// Errors from running a child process to completion.
#[derive(Debug, Error)]
pub enum SubprocessError {
    #[error("{label} failed to start: {source}")]
    Spawn {
        label: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{label} timed out after {timeout_secs}s")]
    TimedOut { label: String, timeout_secs: u64 },
}

/// Run a command to completion, capturing stdout and stderr fully.
///
/// The child gets a null stdin (the engine must not wait on a terminal)
/// and is killed when the deadline elapses; `kill_on_drop` covers the
/// future dropped by the timeout.
pub async fn run_with_timeout(
    mut cmd: Command,
    timeout: Duration,
    label: &str,
) -> Result<Output, SubprocessError> {
    cmd.stdin(Stdio::null()).kill_on_drop(true);
    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(source)) => Err(SubprocessError::Spawn { label: label.to_string(), source }),
        Err(_) => Err(SubprocessError::TimedOut {
            label: label.to_string(),
            timeout_secs: timeout.as_secs(),
        }),
    }
}

#[cfg(test)]
#[path = "subprocess_tests.rs"]
mod tests;
