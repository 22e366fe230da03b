//! Core types and shared functionality for the CalIO offline worker.
//!
//! This crate provides:
//! - Versioned cache bucket storage with SQLite backend
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheDb, ResponseSnapshot};
pub use config::AppConfig;
pub use error::Error;
