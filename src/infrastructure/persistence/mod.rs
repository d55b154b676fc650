//! Snapshot repository implementations.
//!
//! # Repositories
//!
//! - [`JsonSnapshotRepository`] - Shortlink snapshot stored as a JSON file

pub mod json_snapshot_repository;

pub use json_snapshot_repository::JsonSnapshotRepository;
