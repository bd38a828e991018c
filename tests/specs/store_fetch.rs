// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Store-raw-upload and fetch specs, including the blob tier boundary.

use crate::prelude::*;
use axum::http::StatusCode;

/// A 20 MiB raw upload routes to the blob tier and fetches back
/// byte-identical with the right filename.
#[tokio::test]
async fn large_upload_round_trips_through_blob_tier() {
    let service = Service::with_engine("exit 0");

    let mut content = String::with_capacity(20 * 1024 * 1024);
    while content.len() < 20 * 1024 * 1024 {
        content.push_str("ITEM: ATOMS id type x y z\n");
    }

    let (status, body) =
        service.upload("/api/trajectories", "big.lammpstrj", content.as_bytes()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["tier"], "blob");
    assert_eq!(body["size"].as_u64().unwrap(), content.len() as u64);

    let id = body["artifactId"].as_str().unwrap().to_string();
    assert!(id.starts_with("blob-"));

    let (status, fetched) = service.get(&format!("/api/trajectories/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["tier"], "blob");
    assert_eq!(fetched["filename"], "big.lammpstrj");
    assert_eq!(fetched["content"].as_str().unwrap(), content);
    assert_eq!(fetched["originalInputFile"], serde_json::Value::Null);
}

/// A small raw upload stays inline.
#[tokio::test]
async fn small_upload_stays_inline() {
    let service = Service::with_engine("exit 0");

    let (status, body) =
        service.upload("/api/trajectories", "small.lammpstrj", b"ITEM: TIMESTEP\n0\n").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["tier"], "inline");
    assert!(body["artifactId"].as_str().unwrap().starts_with("doc-"));
}

/// Identifier misuse: malformed syntax is 400, unknown-but-valid is 404.
#[tokio::test]
async fn fetch_distinguishes_malformed_from_unknown() {
    let service = Service::with_engine("exit 0");

    let (status, _) = service.get("/api/trajectories/not%20an%20id").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = service.get("/api/trajectories/blob-AAAAAAAAAAAAAAAAAAA").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}
