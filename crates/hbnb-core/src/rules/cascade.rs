use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::model::{identity_key, Entity};

/// Keys removed when the entity at `root_key` is deleted
///
/// Follows owning references transitively: State → City → Place → Review,
/// User → Place and Review. The root comes first, then dependents in
/// breadth-first order. Amenities are never reached; see `detach_amenity`.
pub fn cascade_keys(objects: &BTreeMap<String, Entity>, root_key: &str) -> Vec<String> {
    let mut removed = vec![root_key.to_string()];
    let mut seen: BTreeSet<String> = removed.iter().cloned().collect();
    let mut queue: VecDeque<String> = removed.iter().cloned().collect();

    while let Some(parent_key) = queue.pop_front() {
        for (key, entity) in objects {
            if seen.contains(key) {
                continue;
            }
            let owned = entity
                .parents()
                .into_iter()
                .any(|(kind, id)| identity_key(kind, id) == parent_key);
            if owned {
                seen.insert(key.clone());
                queue.push_back(key.clone());
                removed.push(key.clone());
            }
        }
    }

    removed
}

/// Drop `amenity_id` from every Place that links it
///
/// Returns the keys of the Places that changed.
pub fn detach_amenity(objects: &mut BTreeMap<String, Entity>, amenity_id: &str) -> Vec<String> {
    objects
        .iter_mut()
        .filter_map(|(key, entity)| {
            let place = entity.as_place_mut()?;
            place.remove_amenity(amenity_id).then(|| key.clone())
        })
        .collect()
}
