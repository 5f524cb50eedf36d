//! Repository layer mapping entities to relational rows
//!
//! Rows become codec records and back, so the relational store decodes
//! through the same registry as the file store.

pub mod sqlite_repo;
pub mod tables;

pub use sqlite_repo::SqliteRepo;
pub use tables::{table_for, ColumnType, TableDef};
