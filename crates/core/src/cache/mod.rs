//! SQLite-backed cache bucket storage for captured responses.
//!
//! This module provides the persistent store behind the worker's caching
//! strategies, using SQLite with async access via tokio-rusqlite. It
//! supports:
//!
//! - Named, versioned cache buckets mapping request URL to response snapshot
//! - Content-addressed entry keys using SHA-256 hashing
//! - Automatic schema migrations
//! - WAL mode for concurrent access
//! - Whole-bucket deletion of superseded cache generations

pub mod buckets;
pub mod connection;
pub mod entries;
pub mod hash;
pub mod migrations;

pub use crate::Error;

pub use connection::CacheDb;
pub use entries::ResponseSnapshot;
