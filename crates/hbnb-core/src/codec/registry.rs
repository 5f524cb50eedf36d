//! Explicit Kind registry
//!
//! Maps each record tag to the factory that rebuilds the matching entity.
//! The standard registry is populated once per process on first use.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::de::DeserializeOwned;

use super::record::Record;
use crate::errors::{HbnbError, Result};
use crate::model::{Amenity, City, Entity, Kind, Place, Review, State, User};

/// Rebuilds an entity from a record already known to carry its tag
pub type Factory = fn(Record) -> Result<Entity>;

#[derive(Debug, Clone, Default)]
pub struct KindRegistry {
    factories: BTreeMap<&'static str, Factory>,
}

impl KindRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with a factory for every Kind
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        for kind in Kind::ALL {
            registry.register(kind.as_str(), factory_for(kind));
        }
        registry
    }

    pub fn register(&mut self, tag: &'static str, factory: Factory) {
        self.factories.insert(tag, factory);
    }

    /// # Errors
    ///
    /// `UnknownKind` when nothing is registered under `tag`.
    pub fn resolve(&self, tag: &str) -> Result<Factory> {
        self.factories
            .get(tag)
            .copied()
            .ok_or_else(|| HbnbError::UnknownKind {
                tag: tag.to_string(),
            })
    }

    pub fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }
}

/// Process-wide registry
pub fn registry() -> &'static KindRegistry {
    static REGISTRY: OnceLock<KindRegistry> = OnceLock::new();
    REGISTRY.get_or_init(KindRegistry::standard)
}

fn factory_for(kind: Kind) -> Factory {
    match kind {
        Kind::User => |r| decode::<User>(Kind::User, r).map(Entity::User),
        Kind::State => |r| decode::<State>(Kind::State, r).map(Entity::State),
        Kind::City => |r| decode::<City>(Kind::City, r).map(Entity::City),
        Kind::Place => |r| decode::<Place>(Kind::Place, r).map(Entity::Place),
        Kind::Review => |r| decode::<Review>(Kind::Review, r).map(Entity::Review),
        Kind::Amenity => |r| decode::<Amenity>(Kind::Amenity, r).map(Entity::Amenity),
    }
}

fn decode<T: DeserializeOwned>(kind: Kind, record: Record) -> Result<T> {
    serde_json::from_value(record.into_value()).map_err(|e| HbnbError::InvalidRecord {
        kind: kind.to_string(),
        reason: e.to_string(),
    })
}
