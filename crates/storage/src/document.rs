// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Inline tier: one self-contained JSON document per artifact.

use crate::{none_if_missing, StoreError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use traj_core::ArtifactId;

/// On-disk shape of an inline artifact record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Document {
    pub filename: String,
    pub content: String,
    pub original_input_file: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub(crate) struct DocumentStore {
    dir: PathBuf,
}

impl DocumentStore {
    pub(crate) fn new(root: &Path) -> Self {
        Self { dir: root.join("documents") }
    }

    /// Write a document record. Write-then-rename, so a crashed write never
    /// leaves a half document visible under the final name.
    pub(crate) async fn put(&self, id: &ArtifactId, doc: &Document) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| StoreError::Write { id: id.clone(), source })?;

        let bytes = serde_json::to_vec(doc)
            .map_err(|source| StoreError::Encode { id: id.clone(), source })?;

        let tmp = self.dir.join(format!("{id}.json.tmp"));
        let path = self.dir.join(format!("{id}.json"));
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|source| StoreError::Write { id: id.clone(), source })?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|source| StoreError::Write { id: id.clone(), source })?;
        Ok(())
    }

    pub(crate) async fn get(&self, id: &ArtifactId) -> Result<Option<Document>, StoreError> {
        let path = self.dir.join(format!("{id}.json"));
        let bytes = match none_if_missing(tokio::fs::read(&path).await)
            .map_err(|source| StoreError::Read { id: id.clone(), source })?
        {
            Some(bytes) => bytes,
            None => return Ok(None),
        };
        let doc = serde_json::from_slice(&bytes)
            .map_err(|source| StoreError::Decode { id: id.clone(), source })?;
        Ok(Some(doc))
    }
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
