//! Serialization codec
//!
//! Bidirectional mapping between an `Entity` and a flat `Record` tagged
//! with its Kind. Both stores go through this module: the file store writes
//! records as JSON, the relational store builds records from rows.

pub mod record;
pub mod registry;
pub mod timestamp;

pub use record::{Record, KIND_TAG};
pub use registry::{registry, KindRegistry};

use crate::errors::{HbnbError, Result};
use crate::model::Entity;
use crate::rules::non_finite_attributes;

/// Entity to tagged record
///
/// # Errors
///
/// `Serialization` if an attribute cannot be represented as JSON, including
/// NaN and infinite floats, which JSON would otherwise turn into `null`.
pub fn serialize(entity: &Entity) -> Result<Record> {
    if let Some(attribute) = non_finite_attributes(entity).first() {
        return Err(HbnbError::Serialization {
            message: format!("{}: '{}' is not a finite number", entity.key(), attribute),
        });
    }

    let value = match entity {
        Entity::User(e) => serde_json::to_value(e),
        Entity::State(e) => serde_json::to_value(e),
        Entity::City(e) => serde_json::to_value(e),
        Entity::Place(e) => serde_json::to_value(e),
        Entity::Review(e) => serde_json::to_value(e),
        Entity::Amenity(e) => serde_json::to_value(e),
    }
    .map_err(|e| HbnbError::Serialization {
        message: e.to_string(),
    })?;

    let mut record = Record::from_value(value)?;
    record.insert(KIND_TAG, entity.kind().as_str());
    Ok(record)
}

/// Tagged record to entity
///
/// Dispatches on the `__class__` tag through the process-wide registry.
/// Attributes absent from the record take the Kind defaults.
///
/// # Errors
///
/// - `MissingKindTag` / `UnknownKind` for an absent or unregistered tag
/// - `InvalidRecord` for an attribute of the wrong primitive type
/// - `TimestampOrder` when `updated_at` precedes `created_at`
pub fn deserialize(record: Record) -> Result<Entity> {
    let tag = record.kind_tag().ok_or(HbnbError::MissingKindTag)?;
    let factory = registry().resolve(tag)?;
    let entity = factory(record)?;

    if !entity.base().timestamps_ordered() {
        return Err(HbnbError::TimestampOrder { key: entity.key() });
    }
    Ok(entity)
}

/// Decode a record stored under `key`, checking that the key names it
///
/// # Errors
///
/// Everything `deserialize` returns, plus `KeyMismatch` when the record's
/// Kind or id disagrees with `key`.
pub fn deserialize_keyed(key: &str, record: Record) -> Result<Entity> {
    let (kind, id) = crate::model::parse_key(key)?;
    if let Some(tag) = record.kind_tag() {
        if tag != kind.as_str() {
            return Err(HbnbError::KeyMismatch {
                key: key.to_string(),
                actual: format!("tagged {}", tag),
            });
        }
    }
    let entity = deserialize(record)?;
    if entity.id() != id {
        return Err(HbnbError::KeyMismatch {
            key: key.to_string(),
            actual: entity.key(),
        });
    }
    Ok(entity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Amenity, City, Place, Review, State, User};
    use serde_json::json;

    fn samples() -> Vec<Entity> {
        let state = State::new("California");
        let city = City::new(&state.base.id, "San Francisco");
        let user = User::new("betty@holberton.com", "pwd").with_name("Betty", "Holberton");
        let amenity = Amenity::new("Wifi");
        let mut place = Place::new(&city.base.id, &user.base.id, "Lovely place");
        place.description = "Cozy".to_string();
        place.number_rooms = 3;
        place.max_guest = 6;
        place.price_by_night = 120;
        place.latitude = 37.774;
        place.longitude = -122.431;
        place.add_amenity(&amenity);
        let review = Review::new(&place.base.id, &user.base.id, "Amazing");

        vec![
            state.into(),
            city.into(),
            user.into(),
            amenity.into(),
            place.into(),
            review.into(),
        ]
    }

    #[test]
    fn test_round_trip_every_kind() {
        for entity in samples() {
            let record = serialize(&entity).unwrap();
            assert_eq!(record.kind_tag(), Some(entity.kind().as_str()));
            assert_eq!(deserialize(record).unwrap(), entity);
        }
    }

    #[test]
    fn test_serialized_timestamps_use_fixed_format() {
        let entity: Entity = State::new("Nevada").into();
        let record = serialize(&entity).unwrap();
        let created = record.get("created_at").and_then(|v| v.as_str()).unwrap();

        assert_eq!(created, timestamp::format(&entity.created_at()));
        assert_eq!(created.len(), "2017-09-28T21:03:54.000000".len());
    }

    #[test]
    fn test_user_password_is_persisted_verbatim() {
        let entity: Entity = User::new("a@b.c", "pwd").into();
        let record = serialize(&entity).unwrap();
        assert_eq!(record.get("password"), Some(&json!("pwd")));
    }

    #[test]
    fn test_missing_tag_is_schema_error() {
        let record = Record::from_value(json!({"name": "x"})).unwrap();
        assert_eq!(deserialize(record), Err(HbnbError::MissingKindTag));
    }

    #[test]
    fn test_unknown_tag_is_schema_error() {
        let record = Record::from_value(json!({"__class__": "BaseModel"})).unwrap();
        assert!(matches!(
            deserialize(record),
            Err(HbnbError::UnknownKind { .. })
        ));
    }

    #[test]
    fn test_missing_attributes_take_defaults() {
        let record = Record::from_value(json!({
            "__class__": "City",
            "id": "c1",
            "created_at": "2017-06-14T22:31:03.285259",
            "updated_at": "2017-06-14T22:31:03.285259"
        }))
        .unwrap();

        match deserialize(record).unwrap() {
            Entity::City(city) => {
                assert_eq!(city.base.id, "c1");
                assert!(city.name.is_empty());
                assert!(city.state_id.is_empty());
            }
            other => panic!("expected City, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_wrong_attribute_type_is_rejected() {
        let record = Record::from_value(json!({
            "__class__": "Place",
            "number_rooms": "three"
        }))
        .unwrap();
        assert!(matches!(
            deserialize(record),
            Err(HbnbError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn test_timestamp_order_enforced() {
        let record = Record::from_value(json!({
            "__class__": "State",
            "id": "s1",
            "created_at": "2020-01-02T00:00:00.000000",
            "updated_at": "2020-01-01T00:00:00.000000"
        }))
        .unwrap();
        assert_eq!(
            deserialize(record),
            Err(HbnbError::TimestampOrder {
                key: "State.s1".to_string()
            })
        );
    }

    #[test]
    fn test_deserialize_keyed_checks_key() {
        let entity: Entity = Amenity::new("Pool").into();
        let record = serialize(&entity).unwrap();

        assert_eq!(
            deserialize_keyed(&entity.key(), record.clone()).unwrap(),
            entity
        );
        assert!(matches!(
            deserialize_keyed("Amenity.other", record.clone()),
            Err(HbnbError::KeyMismatch { .. })
        ));
        assert!(matches!(
            deserialize_keyed(&format!("State.{}", entity.id()), record),
            Err(HbnbError::KeyMismatch { .. })
        ));
    }
}
