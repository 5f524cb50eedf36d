//! Ephemeral, file-backed store
//!
//! The identity map lives in memory; `save()` writes the whole map to one
//! JSON document keyed by identity key, and `reload()` reads it back.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use hbnb_core::codec::{self, Record};
use hbnb_core::errors::HbError;
use hbnb_core::model::{identity_key, Entity, Kind};
use hbnb_core::rules::{cascade_keys, detach_amenity, validate_all};
use serde_json::{Map, Value};

use crate::atomic::atomic_write;
use crate::engine::{ReloadReport, SkippedRecord, StorageEngine};
use crate::errors::{corrupt_storage, io_error, not_found, serialization_error, Result};

pub struct FileStorage {
    path: PathBuf,
    objects: BTreeMap<String, Entity>,
}

impl FileStorage {
    /// Store persisting to `path`; nothing is read until `reload()`
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            objects: BTreeMap::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Encode the identity map as the durable document
    ///
    /// Keys are sorted and the output compact, so an unchanged map always
    /// produces the same bytes.
    fn encode(&self) -> Result<Vec<u8>> {
        validate_all(self.objects.values()).map_err(|e| HbError::from(e).with_op("save"))?;

        let mut document = Map::new();
        for (key, entity) in &self.objects {
            let record = codec::serialize(entity).map_err(HbError::from)?;
            document.insert(key.clone(), record.into_value());
        }
        serde_json::to_vec(&Value::Object(document)).map_err(|e| serialization_error("save", e))
    }

    /// Parse the durable document, `None` if there is no file yet
    fn read_document(&self) -> Result<Option<Map<String, Value>>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error("reload", e)),
        };

        let document: Value = serde_json::from_slice(&bytes)
            .map_err(|e| corrupt_storage(&self.path, &e.to_string()))?;
        match document {
            Value::Object(map) => Ok(Some(map)),
            _ => Err(corrupt_storage(&self.path, "top-level value is not an object")),
        }
    }
}

impl StorageEngine for FileStorage {
    fn backend(&self) -> &'static str {
        "file"
    }

    fn all(&mut self, kind: Option<Kind>) -> Result<BTreeMap<String, Entity>> {
        Ok(self
            .objects
            .iter()
            .filter(|(_, entity)| kind.map_or(true, |k| entity.kind() == k))
            .map(|(key, entity)| (key.clone(), entity.clone()))
            .collect())
    }

    fn get(&mut self, kind: Kind, id: &str) -> Result<Entity> {
        let key = identity_key(kind, id);
        self.objects
            .get(&key)
            .cloned()
            .ok_or_else(|| not_found("get", &key))
    }

    fn count(&mut self, kind: Option<Kind>) -> Result<usize> {
        Ok(match kind {
            Some(k) => self.objects.values().filter(|e| e.kind() == k).count(),
            None => self.objects.len(),
        })
    }

    fn new(&mut self, entity: Entity) -> Result<()> {
        self.objects.insert(entity.key(), entity);
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        let bytes = self.encode()?;
        atomic_write(&self.path, &bytes)?;
        tracing::debug!(
            path = %self.path.display(),
            objects = self.objects.len(),
            bytes = bytes.len(),
            "store file written"
        );
        Ok(())
    }

    fn delete(&mut self, entity: &Entity) -> Result<()> {
        let key = entity.key();
        if !self.objects.contains_key(&key) {
            return Err(not_found("delete", &key));
        }

        let removed = cascade_keys(&self.objects, &key);
        for dependent in &removed {
            self.objects.remove(dependent);
        }
        let detached = if entity.kind() == Kind::Amenity {
            detach_amenity(&mut self.objects, entity.id())
        } else {
            Vec::new()
        };

        tracing::debug!(
            key = %key,
            removed = removed.len(),
            detached = detached.len(),
            "delete staged"
        );
        Ok(())
    }

    fn reload(&mut self) -> Result<ReloadReport> {
        let mut report = ReloadReport::default();
        let Some(document) = self.read_document()? else {
            tracing::debug!(path = %self.path.display(), "no store file, nothing to reload");
            return Ok(report);
        };

        // Decoded aside and merged only once the whole document is sound
        let mut decoded = BTreeMap::new();
        for (key, value) in document {
            let record = Record::from_value(value)
                .map_err(|e| corrupt_storage(&self.path, &format!("{}: {}", key, e)))?;
            match codec::deserialize_keyed(&key, record) {
                Ok(entity) => {
                    decoded.insert(key, entity);
                }
                Err(err) => {
                    let error = HbError::from(err).with_op("reload");
                    tracing::warn!(key = %key, error = %error, "skipping undecodable record");
                    report.skipped.push(SkippedRecord { key, error });
                }
            }
        }

        report.loaded = decoded.len();
        self.objects.extend(decoded);
        Ok(report)
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        let staged = std::mem::take(&mut self.objects);
        if let Err(err) = self.reload() {
            self.objects = staged;
            return Err(err);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbnb_core::model::{City, State, User};
    use hbnb_core::HbErrorKind;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileStorage {
        FileStorage::with_path(dir.path().join("file.json"))
    }

    #[test]
    fn test_reload_without_file_is_noop() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        let report = store.reload().unwrap();

        assert_eq!(report.loaded, 0);
        assert!(store.all(None).unwrap().is_empty());
    }

    #[test]
    fn test_new_is_memory_only() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        store.new(State::new("Nevada").into()).unwrap();

        assert_eq!(store.count(None).unwrap(), 1);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_save_rejects_missing_required_attribute() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.new(User::new("", "pw").into()).unwrap();

        let err = store.save().unwrap_err();

        assert_eq!(err.kind(), HbErrorKind::ConstraintViolation);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_delete_unknown_is_not_found() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        let err = store.delete(&State::new("Ohio").into()).unwrap_err();
        assert_eq!(err.kind(), HbErrorKind::NotFound);
    }

    #[test]
    fn test_delete_cascades_in_memory() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let state = State::new("California");
        let city = City::new(&state.base.id, "Fresno");
        store.new(state.clone().into()).unwrap();
        store.new(city.into()).unwrap();

        store.delete(&state.into()).unwrap();

        assert_eq!(store.count(Some(Kind::City)).unwrap(), 0);
    }

    #[test]
    fn test_rollback_restores_durable_snapshot() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let state = State::new("Utah");
        store.new(state.clone().into()).unwrap();
        store.save().unwrap();

        store.new(State::new("Idaho").into()).unwrap();
        store.delete(&state.clone().into()).unwrap();
        store.rollback().unwrap();

        let all = store.all(None).unwrap();
        assert_eq!(all.len(), 1);
        assert!(all.contains_key(&identity_key(Kind::State, &state.base.id)));
    }
}
