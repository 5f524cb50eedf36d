//! Migration framework
//!
//! Provides:
//! - Migration runner with checksums
//! - Idempotent application
//! - Embedded SQL migrations
//! - Full teardown for the test environment

mod checksums;
mod embedded;
mod runner;

pub use runner::{apply_migrations, applied_migrations, drop_all};
