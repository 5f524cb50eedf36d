//! HBnB Store - dual-backend persistence behind one facade
//!
//! Provides:
//! - `FileStorage`: in-memory identity map persisted to a JSON file
//! - `DbStorage`: SQLite tables with a staged unit of work
//! - `Storage`: the facade callers use, selected by `StorageConfig`
//! - Embedded schema migrations for the relational backend

pub mod atomic;
pub mod config;
pub mod db;
pub mod db_storage;
pub mod engine;
pub mod errors;
pub mod facade;
pub mod file_storage;
pub mod migrations;
pub mod repo;

// Re-export key types
pub use config::{BackendKind, DbTarget, StorageConfig};
pub use db_storage::DbStorage;
pub use engine::{ReloadReport, SkippedRecord, StorageEngine};
pub use errors::Result;
pub use facade::Storage;
pub use file_storage::FileStorage;
