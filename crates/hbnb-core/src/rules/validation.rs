use crate::errors::{HbnbError, Result};
use crate::model::{Entity, Kind};

/// Attributes that must be non-blank when an entity is committed
pub fn required_attributes(kind: Kind) -> &'static [&'static str] {
    match kind {
        Kind::User => &["email", "password"],
        Kind::State => &["name"],
        Kind::City => &["state_id", "name"],
        Kind::Place => &["city_id", "user_id", "name"],
        Kind::Review => &["place_id", "user_id", "text"],
        Kind::Amenity => &["name"],
    }
}

/// Required attributes of `entity` that are empty or whitespace
pub fn missing_attributes(entity: &Entity) -> Vec<&'static str> {
    let values: Vec<&str> = match entity {
        Entity::User(u) => vec![u.email.as_str(), u.password.expose().as_str()],
        Entity::State(s) => vec![s.name.as_str()],
        Entity::City(c) => vec![c.state_id.as_str(), c.name.as_str()],
        Entity::Place(p) => vec![p.city_id.as_str(), p.user_id.as_str(), p.name.as_str()],
        Entity::Review(r) => vec![r.place_id.as_str(), r.user_id.as_str(), r.text.as_str()],
        Entity::Amenity(a) => vec![a.name.as_str()],
    };

    required_attributes(entity.kind())
        .iter()
        .zip(values)
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect()
}

/// Reject an entity with a blank required attribute
///
/// # Errors
///
/// `MissingAttribute` naming the first blank attribute.
pub fn validate_required(entity: &Entity) -> Result<()> {
    match missing_attributes(entity).first() {
        Some(attribute) => Err(HbnbError::MissingAttribute {
            key: entity.key(),
            attribute: attribute.to_string(),
        }),
        None => Ok(()),
    }
}

/// Numeric attributes of `entity` holding NaN or an infinity
pub fn non_finite_attributes(entity: &Entity) -> Vec<&'static str> {
    match entity {
        Entity::Place(p) => [("latitude", p.latitude), ("longitude", p.longitude)]
            .into_iter()
            .filter(|(_, value)| !value.is_finite())
            .map(|(name, _)| name)
            .collect(),
        _ => Vec::new(),
    }
}

/// Reject an entity whose attributes JSON or SQL cannot hold
///
/// # Errors
///
/// `NonFiniteAttribute` naming the first offending attribute.
pub fn validate_representable(entity: &Entity) -> Result<()> {
    match non_finite_attributes(entity).first() {
        Some(attribute) => Err(HbnbError::NonFiniteAttribute {
            key: entity.key(),
            attribute: attribute.to_string(),
        }),
        None => Ok(()),
    }
}

/// Validate a whole batch, stopping at the first failure
///
/// # Errors
///
/// The first `MissingAttribute` or `NonFiniteAttribute` found.
pub fn validate_all<'a>(entities: impl IntoIterator<Item = &'a Entity>) -> Result<()> {
    entities.into_iter().try_for_each(|entity| {
        validate_required(entity)?;
        validate_representable(entity)
    })
}
