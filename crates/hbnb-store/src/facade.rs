//! Storage facade
//!
//! The single entry point callers use. It owns exactly one backend, chosen
//! from [`StorageConfig`], and forwards every operation to it.
//!
//! ## Logging Ownership
//!
//! The facade owns lifecycle logging for storage operations:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! Backends use only `tracing::debug!()`/`warn!()` for internal details.

use std::collections::BTreeMap;
use std::time::Instant;

use hbnb_core::model::{Amenity, City, Entity, Kind, Place, Review};
use hbnb_core::{log_op_end, log_op_error, log_op_start};

use crate::config::{BackendKind, StorageConfig};
use crate::db_storage::DbStorage;
use crate::engine::{ReloadReport, StorageEngine};
use crate::errors::Result;
use crate::file_storage::FileStorage;

pub struct Storage {
    engine: Box<dyn StorageEngine>,
}

impl Storage {
    /// Build the configured backend. Performs no I/O; call `reload()` next.
    pub fn init(config: &StorageConfig) -> Self {
        let engine: Box<dyn StorageEngine> = match config.backend {
            BackendKind::File => Box::new(FileStorage::with_path(config.file_path.clone())),
            BackendKind::Db => Box::new(
                DbStorage::with_target(config.db_target.clone())
                    .with_drop_on_reload(config.drop_on_reload),
            ),
        };
        Self::from_engine(engine)
    }

    pub fn from_engine(engine: Box<dyn StorageEngine>) -> Self {
        Self { engine }
    }

    pub fn backend(&self) -> &'static str {
        self.engine.backend()
    }

    /// Every entity, or only those of `kind`
    ///
    /// # Errors
    ///
    /// `Connection` when the relational session is closed.
    pub fn all(&mut self, kind: Option<Kind>) -> Result<BTreeMap<String, Entity>> {
        log_op_start!("all", backend = self.backend(), kind = kind.map_or("*", |k| k.as_str()));
        let start = Instant::now();
        let result = self.engine.all(kind);
        self.finish("all", start, result)
    }

    /// # Errors
    ///
    /// `NotFound` when no entity has that Kind and id.
    pub fn get(&mut self, kind: Kind, id: &str) -> Result<Entity> {
        log_op_start!("get", backend = self.backend(), kind = kind.as_str(), id = id);
        let start = Instant::now();
        let result = self.engine.get(kind, id);
        self.finish("get", start, result)
    }

    /// # Errors
    ///
    /// `Connection` when the relational session is closed.
    pub fn count(&mut self, kind: Option<Kind>) -> Result<usize> {
        log_op_start!("count", backend = self.backend(), kind = kind.map_or("*", |k| k.as_str()));
        let start = Instant::now();
        let result = self.engine.count(kind);
        self.finish("count", start, result)
    }

    /// Stage `entity` for the next `save()`
    ///
    /// # Errors
    ///
    /// `Connection` when closed, `ConstraintViolation` while a failed commit
    /// awaits `rollback()`.
    #[allow(clippy::new_ret_no_self)]
    pub fn new(&mut self, entity: Entity) -> Result<()> {
        let key = entity.key();
        log_op_start!("new", backend = self.backend(), entity_key = %key);
        let start = Instant::now();
        let result = self.engine.new(entity);
        self.finish("new", start, result)
    }

    /// Commit staged work
    ///
    /// # Errors
    ///
    /// `ConstraintViolation` if validation or the engine rejects the commit;
    /// nothing is written in that case.
    pub fn save(&mut self) -> Result<()> {
        log_op_start!("save", backend = self.backend());
        let start = Instant::now();
        let result = self.engine.save();
        self.finish("save", start, result)
    }

    /// Stage deletion of `entity` and its dependents
    ///
    /// # Errors
    ///
    /// `NotFound` when the entity is neither stored nor staged.
    pub fn delete(&mut self, entity: &Entity) -> Result<()> {
        let key = entity.key();
        log_op_start!("delete", backend = self.backend(), entity_key = %key);
        let start = Instant::now();
        let result = self.engine.delete(entity);
        self.finish("delete", start, result)
    }

    /// # Errors
    ///
    /// `CorruptStorage` for an unreadable store file, `Connection` when the
    /// database cannot be opened.
    pub fn reload(&mut self) -> Result<ReloadReport> {
        log_op_start!("reload", backend = self.backend());
        let start = Instant::now();
        let result = self.engine.reload();
        if let Ok(report) = &result {
            if !report.is_clean() {
                tracing::warn!(
                    backend = self.backend(),
                    skipped = report.skipped.len(),
                    "reload skipped undecodable records"
                );
            }
        }
        self.finish("reload", start, result)
    }

    /// # Errors
    ///
    /// `Persistence` if the engine fails to release its connection.
    pub fn close(&mut self) -> Result<()> {
        log_op_start!("close", backend = self.backend());
        let start = Instant::now();
        let result = self.engine.close();
        self.finish("close", start, result)
    }

    /// # Errors
    ///
    /// File backend: whatever `reload()` can return.
    pub fn rollback(&mut self) -> Result<()> {
        log_op_start!("rollback", backend = self.backend());
        let start = Instant::now();
        let result = self.engine.rollback();
        self.finish("rollback", start, result)
    }

    /// Refresh `updated_at`, stage, and commit in one step
    ///
    /// `entity` only takes the new `updated_at` once the commit succeeds.
    ///
    /// # Errors
    ///
    /// Everything `new()` and `save()` return.
    pub fn persist(&mut self, entity: &mut Entity) -> Result<()> {
        let mut touched = entity.clone();
        touched.touch();
        self.new(touched.clone())?;
        self.save()?;
        *entity = touched;
        Ok(())
    }

    /// Cities of a State
    ///
    /// # Errors
    ///
    /// Same as `all()`.
    pub fn cities_of(&mut self, state_id: &str) -> Result<Vec<City>> {
        Ok(self
            .all(Some(Kind::City))?
            .into_values()
            .filter_map(|entity| match entity {
                Entity::City(city) if city.state_id == state_id => Some(city),
                _ => None,
            })
            .collect())
    }

    /// Places in a City
    ///
    /// # Errors
    ///
    /// Same as `all()`.
    pub fn places_of_city(&mut self, city_id: &str) -> Result<Vec<Place>> {
        Ok(self
            .all(Some(Kind::Place))?
            .into_values()
            .filter_map(|entity| match entity {
                Entity::Place(place) if place.city_id == city_id => Some(place),
                _ => None,
            })
            .collect())
    }

    /// Reviews of a Place
    ///
    /// # Errors
    ///
    /// Same as `all()`.
    pub fn reviews_of(&mut self, place_id: &str) -> Result<Vec<Review>> {
        Ok(self
            .all(Some(Kind::Review))?
            .into_values()
            .filter_map(|entity| match entity {
                Entity::Review(review) if review.place_id == place_id => Some(review),
                _ => None,
            })
            .collect())
    }

    /// Amenities linked to `place`, in link order
    ///
    /// Links to amenities that no longer exist are ignored.
    ///
    /// # Errors
    ///
    /// Same as `all()`.
    pub fn amenities_of(&mut self, place: &Place) -> Result<Vec<Amenity>> {
        let mut amenities = self.all(Some(Kind::Amenity))?;
        Ok(place
            .amenity_ids
            .iter()
            .filter_map(|id| {
                match amenities.remove(&hbnb_core::model::identity_key(Kind::Amenity, id)) {
                    Some(Entity::Amenity(amenity)) => Some(amenity),
                    _ => None,
                }
            })
            .collect())
    }

    fn finish<T>(&self, op: &'static str, start: Instant, result: Result<T>) -> Result<T> {
        let duration_ms = start.elapsed().as_millis() as u64;
        match result {
            Ok(value) => {
                log_op_end!(op, duration_ms = duration_ms, backend = self.backend());
                Ok(value)
            }
            Err(err) => {
                let err = match err.op() {
                    Some(_) => err.with_backend(self.backend()),
                    None => err.with_backend(self.backend()).with_op(op),
                };
                log_op_error!(
                    op,
                    err.clone(),
                    duration_ms = duration_ms,
                    backend = self.backend()
                );
                Err(err)
            }
        }
    }
}
