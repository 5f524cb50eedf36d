//! The contract both backends implement
//!
//! Callers never hold a backend directly; they go through
//! [`crate::facade::Storage`], which adds logging and error context.

use std::collections::BTreeMap;

use hbnb_core::errors::HbError;
use hbnb_core::model::{Entity, Kind};

use crate::errors::Result;

/// A record `reload()` could not decode and left out of the identity map
#[derive(Debug, Clone)]
pub struct SkippedRecord {
    pub key: String,
    pub error: HbError,
}

/// Outcome of a `reload()`
#[derive(Debug, Clone, Default)]
pub struct ReloadReport {
    /// Entities placed in the identity map
    pub loaded: usize,
    pub skipped: Vec<SkippedRecord>,
}

impl ReloadReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Uniform access contract over the identity map and its durable copy
///
/// Mutations (`new`, `delete`) are staged; `save` makes them durable as a
/// single all-or-nothing step.
#[allow(clippy::new_ret_no_self)]
pub trait StorageEngine {
    /// Backend name for logs and error context (`file` or `db`)
    fn backend(&self) -> &'static str;

    /// Every entity, or only those of `kind`, keyed `<Kind>.<id>`
    fn all(&mut self, kind: Option<Kind>) -> Result<BTreeMap<String, Entity>>;

    /// One entity by Kind and id
    fn get(&mut self, kind: Kind, id: &str) -> Result<Entity>;

    fn count(&mut self, kind: Option<Kind>) -> Result<usize> {
        Ok(self.all(kind)?.len())
    }

    /// Stage an insert or update of `entity`
    fn new(&mut self, entity: Entity) -> Result<()>;

    /// Make staged work durable
    fn save(&mut self) -> Result<()>;

    /// Stage removal of `entity` and everything it owns
    fn delete(&mut self, entity: &Entity) -> Result<()>;

    /// Load (or reconnect to) the durable state
    fn reload(&mut self) -> Result<ReloadReport>;

    /// Release the backend's resources
    fn close(&mut self) -> Result<()>;

    /// Discard staged work
    fn rollback(&mut self) -> Result<()>;
}
