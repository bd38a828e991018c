// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Blob tier: chunked content with side metadata.
//!
//! Layout per artifact: `blobs/<id>/chunks/NNNNNN` data chunks plus
//! `blobs/<id>/meta.json`. The metadata document is written last and its
//! presence marks the blob complete; readers that find no metadata treat
//! the blob as absent.

use crate::{none_if_missing, StoreError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use traj_core::ArtifactId;

/// Chunk size matching the original chunked-blob backend.
pub(crate) const CHUNK_SIZE: usize = 255 * 1024;

/// Side metadata stored next to the chunks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct BlobMeta {
    pub filename: String,
    pub original_input_file: Option<String>,
    pub created_at: DateTime<Utc>,
    pub content_type: String,
    pub length: u64,
    pub chunk_size: u32,
    pub chunk_count: u32,
}

#[derive(Debug, Clone)]
pub(crate) struct BlobStore {
    dir: PathBuf,
}

impl BlobStore {
    pub(crate) fn new(root: &Path) -> Self {
        Self { dir: root.join("blobs") }
    }

    fn blob_dir(&self, id: &ArtifactId) -> PathBuf {
        self.dir.join(id.as_str())
    }

    /// Stream the content out in fixed-size chunks, then commit by writing
    /// the metadata. A failed write abandons the partial blob.
    pub(crate) async fn put(
        &self,
        id: &ArtifactId,
        filename: &str,
        original_input_file: Option<String>,
        created_at: DateTime<Utc>,
        content: &str,
    ) -> Result<(), StoreError> {
        let blob_dir = self.blob_dir(id);
        let chunks_dir = blob_dir.join("chunks");
        tokio::fs::create_dir_all(&chunks_dir)
            .await
            .map_err(|source| StoreError::Write { id: id.clone(), source })?;

        let bytes = content.as_bytes();
        let mut chunk_count: u32 = 0;
        for (index, chunk) in bytes.chunks(CHUNK_SIZE).enumerate() {
            let path = chunks_dir.join(format!("{index:06}"));
            if let Err(source) = tokio::fs::write(&path, chunk).await {
                self.abandon(&blob_dir).await;
                return Err(StoreError::Write { id: id.clone(), source });
            }
            chunk_count += 1;
        }

        let meta = BlobMeta {
            filename: filename.to_string(),
            original_input_file,
            created_at,
            content_type: "text/plain".to_string(),
            length: bytes.len() as u64,
            chunk_size: CHUNK_SIZE as u32,
            chunk_count,
        };
        let meta_bytes = serde_json::to_vec(&meta)
            .map_err(|source| StoreError::Encode { id: id.clone(), source })?;
        if let Err(source) = tokio::fs::write(blob_dir.join("meta.json"), &meta_bytes).await {
            self.abandon(&blob_dir).await;
            return Err(StoreError::Write { id: id.clone(), source });
        }
        Ok(())
    }

    /// Read the metadata and accumulate every chunk, in order, into one
    /// buffer.
    pub(crate) async fn get(
        &self,
        id: &ArtifactId,
    ) -> Result<Option<(BlobMeta, Vec<u8>)>, StoreError> {
        let blob_dir = self.blob_dir(id);
        let meta_bytes = match none_if_missing(
            tokio::fs::read(blob_dir.join("meta.json")).await,
        )
        .map_err(|source| StoreError::Read { id: id.clone(), source })?
        {
            Some(bytes) => bytes,
            None => return Ok(None),
        };
        let meta: BlobMeta = serde_json::from_slice(&meta_bytes)
            .map_err(|source| StoreError::Decode { id: id.clone(), source })?;

        let chunks_dir = blob_dir.join("chunks");
        let mut content = Vec::with_capacity(meta.length as usize);
        for index in 0..meta.chunk_count {
            let chunk = tokio::fs::read(chunks_dir.join(format!("{index:06}")))
                .await
                .map_err(|source| StoreError::Read { id: id.clone(), source })?;
            content.extend_from_slice(&chunk);
        }

        if content.len() as u64 != meta.length {
            return Err(StoreError::Corrupt { id: id.clone() });
        }
        Ok(Some((meta, content)))
    }

    async fn abandon(&self, blob_dir: &Path) {
        if let Err(e) = tokio::fs::remove_dir_all(blob_dir).await {
            tracing::warn!(
                path = %blob_dir.display(),
                error = %e,
                "failed to remove partial blob (best-effort)"
            );
        }
    }
}

#[cfg(test)]
#[path = "blob_tests.rs"]
mod tests;
