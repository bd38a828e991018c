// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn generate_tags_inline_ids() {
    let id = ArtifactId::generate(StorageTier::Inline);
    assert!(id.as_str().starts_with("doc-"));
    assert_eq!(id.tier(), StorageTier::Inline);
}

#[test]
fn generate_tags_blob_ids() {
    let id = ArtifactId::generate(StorageTier::Blob);
    assert!(id.as_str().starts_with("blob-"));
    assert_eq!(id.tier(), StorageTier::Blob);
}

#[test]
fn generated_ids_round_trip_through_parse() {
    for tier in [StorageTier::Inline, StorageTier::Blob] {
        let id = ArtifactId::generate(tier);
        let parsed = ArtifactId::parse(id.as_str()).unwrap();
        assert_eq!(parsed, id);
    }
}

#[yare::parameterized(
    empty          = { "" },
    no_separator   = { "docabcdefghijklmnopqrs" },
    unknown_tag    = { "txt-abcdefghijklmnopqrs" },
    short_suffix   = { "doc-abc" },
    long_suffix    = { "blob-abcdefghijklmnopqrstuv" },
    bad_chars      = { "doc-abcdefghij/lmnopqrs" },
    path_traversal = { "doc-../../../etc/passwd" },
)]
fn parse_rejects_malformed(input: &str) {
    assert!(ArtifactId::parse(input).is_err());
}

#[test]
fn parse_accepts_nanoid_alphabet() {
    let id = ArtifactId::parse("doc-aB3_-aB3_-aB3_-aB34").unwrap();
    assert_eq!(id.tier(), StorageTier::Inline);
}

#[test]
fn tier_display() {
    assert_eq!(StorageTier::Inline.to_string(), "inline");
    assert_eq!(StorageTier::Blob.to_string(), "blob");
}

#[test]
fn tier_serde_is_lowercase() {
    assert_eq!(serde_json::to_string(&StorageTier::Inline).unwrap(), "\"inline\"");
    assert_eq!(serde_json::to_string(&StorageTier::Blob).unwrap(), "\"blob\"");
}

#[test]
fn artifact_size_is_content_bytes() {
    let artifact = Artifact {
        filename: "dump.out.lammpstrj".to_string(),
        content: "ITEM: TIMESTEP\n0\n".to_string(),
        original_input_file: Some("in.melt".to_string()),
        created_at: Utc::now(),
        tier: StorageTier::Inline,
    };
    assert_eq!(artifact.size_bytes(), 17);
}

#[test]
fn artifact_serde_round_trip() {
    let artifact = Artifact {
        filename: "dump.out.lammpstrj".to_string(),
        content: "atoms".to_string(),
        original_input_file: None,
        created_at: Utc::now(),
        tier: StorageTier::Blob,
    };
    let json = serde_json::to_string(&artifact).unwrap();
    let parsed: Artifact = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, artifact);
}
