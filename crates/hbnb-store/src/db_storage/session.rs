//! Unit of work for the relational store
//!
//! Holds staged upserts and deletes between `save()` calls, plus the flag
//! set when a commit fails.

use std::collections::{BTreeMap, BTreeSet};

use hbnb_core::model::{parse_key, Entity, Kind};
use hbnb_core::rules::{cascade_keys, detach_amenity};

#[derive(Debug, Default)]
pub struct Session {
    upserts: BTreeMap<String, Entity>,
    deletes: BTreeSet<String>,
    failed: bool,
}

impl Session {
    /// Stage an upsert, cancelling any staged delete of the same key
    pub fn stage_upsert(&mut self, entity: Entity) {
        let key = entity.key();
        self.deletes.remove(&key);
        self.upserts.insert(key, entity);
    }

    /// Drop a staged upsert; true if there was one
    pub fn unstage_upsert(&mut self, key: &str) -> bool {
        self.upserts.remove(key).is_some()
    }

    pub fn stage_delete(&mut self, key: String) {
        self.upserts.remove(&key);
        self.deletes.insert(key);
    }

    pub fn is_empty(&self) -> bool {
        self.upserts.is_empty() && self.deletes.is_empty()
    }

    pub fn has_deletes(&self) -> bool {
        !self.deletes.is_empty()
    }

    pub fn staged_count(&self) -> usize {
        self.upserts.len() + self.deletes.len()
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    pub fn mark_failed(&mut self) {
        self.failed = true;
    }

    /// Forget all staged work and the failure flag
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Staged upserts, parents before children
    pub fn upserts_in_order(&self) -> Vec<&Entity> {
        let mut ordered: Vec<&Entity> = self.upserts.values().collect();
        ordered.sort_by_key(|entity| entity.kind());
        ordered
    }

    /// Staged deletes as (Kind, id); keys that fail to parse are never staged
    pub fn deletes(&self) -> impl Iterator<Item = (Kind, &str)> + '_ {
        self.deletes.iter().filter_map(|key| parse_key(key).ok())
    }

    /// Apply staged work to a map of committed entities
    ///
    /// Gives readers the same view the file store would show: staged
    /// entities present, deleted ones and their dependents gone.
    pub fn overlay(&self, objects: &mut BTreeMap<String, Entity>) {
        for (key, entity) in &self.upserts {
            objects.insert(key.clone(), entity.clone());
        }
        for (kind, id) in self.deletes() {
            apply_delete(objects, kind, id);
        }
    }
}

/// Remove `kind`/`id` and everything that cascades from it
pub(crate) fn apply_delete(objects: &mut BTreeMap<String, Entity>, kind: Kind, id: &str) {
    let key = hbnb_core::model::identity_key(kind, id);
    for dependent in cascade_keys(objects, &key) {
        objects.remove(&dependent);
    }
    if kind == Kind::Amenity {
        detach_amenity(objects, id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbnb_core::model::{City, State, User};

    #[test]
    fn test_upsert_cancels_delete() {
        let mut session = Session::default();
        let state: Entity = State::new("Vermont").into();

        session.stage_delete(state.key());
        session.stage_upsert(state.clone());

        assert!(!session.has_deletes());
        assert_eq!(session.staged_count(), 1);
    }

    #[test]
    fn test_upserts_ordered_parents_first() {
        let mut session = Session::default();
        let state = State::new("Iowa");
        let city = City::new(&state.base.id, "Ames");
        session.stage_upsert(city.into());
        session.stage_upsert(User::new("u@v.w", "pw").into());
        session.stage_upsert(state.into());

        let kinds: Vec<Kind> = session
            .upserts_in_order()
            .into_iter()
            .map(Entity::kind)
            .collect();
        assert_eq!(kinds, vec![Kind::User, Kind::State, Kind::City]);
    }

    #[test]
    fn test_overlay_hides_cascaded_dependents() {
        let state = State::new("Kansas");
        let city = City::new(&state.base.id, "Wichita");
        let mut objects: BTreeMap<String, Entity> = [Entity::from(state.clone()), city.into()]
            .into_iter()
            .map(|e| (e.key(), e))
            .collect();

        let mut session = Session::default();
        session.stage_delete(Entity::from(state).key());
        session.overlay(&mut objects);

        assert!(objects.is_empty());
    }

    #[test]
    fn test_clear_resets_failure() {
        let mut session = Session::default();
        session.mark_failed();
        session.clear();
        assert!(!session.is_failed());
    }
}
