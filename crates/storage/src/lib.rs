// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! traj-storage: two-tier artifact persistence
//!
//! Small artifacts are written as single self-contained documents; large
//! ones go through a chunked blob backend. Both sit behind one store with
//! a uniform read contract: an identifier either resolves to the full
//! artifact or to `NotFound`, regardless of tier.

mod blob;
mod document;

use blob::BlobStore;
use chrono::Utc;
use document::{Document, DocumentStore};
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use traj_core::{Artifact, ArtifactDescriptor, ArtifactId, StorageTier};

/// Contents strictly below this many bytes are stored inline; everything
/// at or above it goes to the blob tier.
pub const INLINE_MAX_BYTES: usize = 15 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum StoreError {
    /// No tier holds this identifier.
    #[error("artifact not found")]
    NotFound,
    #[error("failed to write artifact {id}: {source}")]
    Write {
        id: ArtifactId,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode artifact {id}: {source}")]
    Encode {
        id: ArtifactId,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to read artifact {id}: {source}")]
    Read {
        id: ArtifactId,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode artifact {id}: {source}")]
    Decode {
        id: ArtifactId,
        #[source]
        source: serde_json::Error,
    },
    /// Stored bytes are no longer valid text.
    #[error("artifact {id} content is corrupt")]
    Corrupt { id: ArtifactId },
}

/// Two-tier artifact store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    documents: DocumentStore,
    blobs: BlobStore,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root: PathBuf = root.into();
        Self { documents: DocumentStore::new(&root), blobs: BlobStore::new(&root) }
    }

    /// Persist an artifact, choosing the tier from its byte size.
    ///
    /// Tier selection happens exactly once, here; the returned identifier
    /// is tagged with the chosen tier and the assignment is never revisited.
    pub async fn put(
        &self,
        filename: &str,
        content: String,
        original_input_file: Option<String>,
    ) -> Result<ArtifactDescriptor, StoreError> {
        let size = content.len();
        let tier =
            if size < INLINE_MAX_BYTES { StorageTier::Inline } else { StorageTier::Blob };
        let id = ArtifactId::generate(tier);
        let created_at = Utc::now();

        match tier {
            StorageTier::Inline => {
                let doc = Document {
                    filename: filename.to_string(),
                    content,
                    original_input_file,
                    created_at,
                };
                self.documents.put(&id, &doc).await?;
            }
            StorageTier::Blob => {
                self.blobs
                    .put(&id, filename, original_input_file, created_at, &content)
                    .await?;
            }
        }

        tracing::info!(id = %id, %tier, bytes = size, "artifact stored");
        Ok(ArtifactDescriptor { id, filename: filename.to_string(), tier, size: size as u64 })
    }

    /// Fetch an artifact by identifier.
    ///
    /// Probes the inline tier first, then the blob tier; the tag on the
    /// identifier keeps the namespaces disjoint so the order never matters
    /// for correctness.
    pub async fn get(&self, id: &ArtifactId) -> Result<Artifact, StoreError> {
        if let Some(doc) = self.documents.get(id).await? {
            return Ok(Artifact {
                filename: doc.filename,
                content: doc.content,
                original_input_file: doc.original_input_file,
                created_at: doc.created_at,
                tier: StorageTier::Inline,
            });
        }

        if let Some((meta, bytes)) = self.blobs.get(id).await? {
            let content = String::from_utf8(bytes)
                .map_err(|_| StoreError::Corrupt { id: id.clone() })?;
            return Ok(Artifact {
                filename: meta.filename,
                content,
                original_input_file: meta.original_input_file,
                created_at: meta.created_at,
                tier: StorageTier::Blob,
            });
        }

        Err(StoreError::NotFound)
    }
}

/// Map an I/O error to `Ok(None)` when it just means "no such record".
fn none_if_missing<T>(result: io::Result<T>) -> io::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
