// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn job_id_has_prefix() {
    let id = JobId::new();
    assert!(id.as_str().starts_with("job-"));
    assert_eq!(id.suffix().len(), 19);
}

#[test]
fn workspace_id_has_prefix() {
    let id = WorkspaceId::new();
    assert!(id.as_str().starts_with("wks-"));
    assert_eq!(id.suffix().len(), 19);
}

#[test]
fn ids_are_unique() {
    let a = WorkspaceId::new();
    let b = WorkspaceId::new();
    assert_ne!(a, b);
}

#[test]
fn id_display_matches_as_str() {
    let id = JobId::from_string("job-abc");
    assert_eq!(id.to_string(), "job-abc");
    assert_eq!(id.as_str(), "job-abc");
}

#[test]
fn id_serde_is_transparent() {
    let id = WorkspaceId::from_string("wks-xyz");
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"wks-xyz\"");

    let parsed: WorkspaceId = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, id);
}

#[test]
fn suffix_strips_prefix_only_when_present() {
    let id = JobId::from_string("job-123");
    assert_eq!(id.suffix(), "123");

    let bare = JobId::from_string("no-prefix-here");
    assert_eq!(bare.suffix(), "no-prefix-here");
}
