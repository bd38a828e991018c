// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output artifact discovery.
//!
//! The engine decides its own output filenames, so after a successful run
//! the workspace is scanned for files that look like the result. The
//! heuristic lives behind a trait so it can be swapped for an explicit
//! output-naming convention without touching the runner.

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Extensions recognized as the canonical trajectory format.
const PRIMARY_SUFFIXES: &[&str] = &["lammpstrj"];

/// Lower-confidence generic dump/output markers.
const SECONDARY_SUFFIXES: &[&str] = &["dump", "xyz", "out"];

/// Strategy for locating the artifact a finished job produced.
#[async_trait]
pub trait DiscoverArtifact: Send + Sync {
    /// Scan a workspace and pick the artifact file, if any.
    ///
    /// `input_filename` is the script the job was started from; it lives
    /// in the same directory and is never a candidate.
    async fn discover(&self, workspace: &Path, input_filename: &str)
        -> io::Result<Option<PathBuf>>;
}

/// Suffix-heuristic discovery.
///
/// Candidates are drawn from the primary suffix tier when any exist,
/// otherwise from the secondary tier. Among candidates the newest
/// modification time wins; same-timestamp ties go to the greatest lexical
/// filename so the choice is deterministic.
#[derive(Debug, Clone, Default)]
pub struct SuffixDiscovery;

struct Candidate {
    path: PathBuf,
    name: String,
    modified: SystemTime,
}

#[async_trait]
impl DiscoverArtifact for SuffixDiscovery {
    async fn discover(
        &self,
        workspace: &Path,
        input_filename: &str,
    ) -> io::Result<Option<PathBuf>> {
        let mut primary: Vec<Candidate> = Vec::new();
        let mut secondary: Vec<Candidate> = Vec::new();

        let mut entries = tokio::fs::read_dir(workspace).await?;
        while let Some(entry) = entries.next_entry().await? {
            let meta = entry.metadata().await?;
            if !meta.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            // The input script must never masquerade as output, whatever
            // suffix it was uploaded with.
            if name == input_filename {
                continue;
            }
            let candidate = Candidate {
                path: entry.path(),
                modified: meta.modified().unwrap_or(SystemTime::UNIX_EPOCH),
                name,
            };
            if has_suffix(&candidate.name, PRIMARY_SUFFIXES) {
                primary.push(candidate);
            } else if has_suffix(&candidate.name, SECONDARY_SUFFIXES) {
                secondary.push(candidate);
            }
        }

        let pool = if primary.is_empty() { secondary } else { primary };
        Ok(pick_newest(pool))
    }
}

fn has_suffix(name: &str, suffixes: &[&str]) -> bool {
    match name.rsplit('.').next() {
        Some(ext) => suffixes.iter().any(|s| ext.eq_ignore_ascii_case(s)),
        None => false,
    }
}

fn pick_newest(mut pool: Vec<Candidate>) -> Option<PathBuf> {
    pool.sort_by(|a, b| a.modified.cmp(&b.modified).then_with(|| a.name.cmp(&b.name)));
    pool.pop().map(|c| c.path)
}

#[cfg(test)]
#[path = "discover_tests.rs"]
mod tests;
