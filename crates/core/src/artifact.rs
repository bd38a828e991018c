// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Artifact data model: storage tiers, tier-tagged identifiers, and the
//! stored record itself.
//!
//! An artifact is written once and never updated. Its identifier carries a
//! format tag (`doc-` vs `blob-`) so the two storage tiers occupy disjoint
//! identifier namespaces and lookup order is collision-free.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Length of the random identifier suffix.
const ID_SUFFIX_LEN: usize = 19;

/// Which backend holds the authoritative content for an artifact.
///
/// Chosen by byte size at write time and never revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageTier {
    /// Small artifact stored as a single self-contained document
    Inline,
    /// Large artifact stored via the chunked blob backend
    Blob,
}

impl StorageTier {
    fn tag(self) -> &'static str {
        match self {
            StorageTier::Inline => "doc",
            StorageTier::Blob => "blob",
        }
    }
}

impl fmt::Display for StorageTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageTier::Inline => write!(f, "inline"),
            StorageTier::Blob => write!(f, "blob"),
        }
    }
}

/// Malformed artifact identifier (unknown tag or bad suffix).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid artifact identifier: {0:?}")]
pub struct InvalidIdentifier(pub String);

/// Opaque handle returned by the store at write time.
///
/// Format: `{tag}-{suffix}` where `tag` names the tier the artifact was
/// written to and `suffix` is a 19-character nanoid. The tag keeps the two
/// tiers' namespaces disjoint; readers still probe inline-then-blob, so the
/// tag is a consistency guarantee rather than routing state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactId(smol_str::SmolStr);

impl ArtifactId {
    /// Generate a fresh identifier for an artifact written to `tier`.
    pub fn generate(tier: StorageTier) -> Self {
        Self(smol_str::SmolStr::new(&format!(
            "{}-{}",
            tier.tag(),
            nanoid::nanoid!(ID_SUFFIX_LEN)
        )))
    }

    /// Validate an identifier received from a caller.
    ///
    /// Rejects anything that is not `{known tag}-{19 nanoid chars}` so the
    /// boundary can answer 400 instead of probing backends with garbage.
    pub fn parse(s: &str) -> Result<Self, InvalidIdentifier> {
        let (tag, suffix) = s.split_once('-').ok_or_else(|| InvalidIdentifier(s.to_string()))?;
        if tag != StorageTier::Inline.tag() && tag != StorageTier::Blob.tag() {
            return Err(InvalidIdentifier(s.to_string()));
        }
        let valid_suffix = suffix.len() == ID_SUFFIX_LEN
            && suffix.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid_suffix {
            return Err(InvalidIdentifier(s.to_string()));
        }
        Ok(Self(smol_str::SmolStr::new(s)))
    }

    /// The tier this identifier was issued for.
    pub fn tier(&self) -> StorageTier {
        if self.0.starts_with("blob-") {
            StorageTier::Blob
        } else {
            StorageTier::Inline
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ArtifactId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A stored artifact as returned by the read path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Name of the file the content came from (or was uploaded as)
    pub filename: String,
    /// Full artifact content, treated as text
    pub content: String,
    /// Input script that produced this artifact; None for direct uploads
    pub original_input_file: Option<String>,
    /// When the artifact was written
    pub created_at: DateTime<Utc>,
    /// Tier that holds the authoritative content
    pub tier: StorageTier,
}

impl Artifact {
    pub fn size_bytes(&self) -> usize {
        self.content.len()
    }
}

/// Write-time receipt for a stored artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactDescriptor {
    pub id: ArtifactId,
    pub filename: String,
    pub tier: StorageTier,
    /// Content length in bytes at write time
    pub size: u64,
}

#[cfg(test)]
#[path = "artifact_tests.rs"]
mod tests;
