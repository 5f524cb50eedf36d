use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::HbnbError;

/// Closed set of entity Kinds
///
/// The tag doubles as the record `__class__` value and the identity-key
/// prefix. Declaration order is parent-before-child, which is the order a
/// batch of inserts must follow to satisfy foreign keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Kind {
    User,
    State,
    Amenity,
    City,
    Place,
    Review,
}

impl Kind {
    /// Every Kind, parents before children
    pub const ALL: [Kind; 6] = [
        Kind::User,
        Kind::State,
        Kind::Amenity,
        Kind::City,
        Kind::Place,
        Kind::Review,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::User => "User",
            Kind::State => "State",
            Kind::Amenity => "Amenity",
            Kind::City => "City",
            Kind::Place => "Place",
            Kind::Review => "Review",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = HbnbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| HbnbError::UnknownKind { tag: s.to_string() })
    }
}

/// Identity-map key: `<Kind>.<id>`
pub fn identity_key(kind: Kind, id: &str) -> String {
    format!("{}.{}", kind, id)
}

/// Split an identity-map key into its Kind and id
///
/// # Errors
///
/// `MalformedKey` when there is no `.` separator or the id is empty,
/// `UnknownKind` when the prefix names no Kind.
pub fn parse_key(key: &str) -> Result<(Kind, &str), HbnbError> {
    let (tag, id) = key.split_once('.').ok_or_else(|| HbnbError::MalformedKey {
        key: key.to_string(),
    })?;
    if id.is_empty() {
        return Err(HbnbError::MalformedKey {
            key: key.to_string(),
        });
    }
    Ok((tag.parse()?, id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_through_str() {
        for kind in Kind::ALL {
            assert_eq!(kind.as_str().parse::<Kind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_kind() {
        let err = "BaseModel".parse::<Kind>().unwrap_err();
        assert_eq!(
            err,
            HbnbError::UnknownKind {
                tag: "BaseModel".to_string()
            }
        );
    }

    #[test]
    fn test_identity_key_format() {
        assert_eq!(identity_key(Kind::City, "abc"), "City.abc");
    }

    #[test]
    fn test_parse_key() {
        assert_eq!(parse_key("Place.1-2-3").unwrap(), (Kind::Place, "1-2-3"));
        assert!(matches!(
            parse_key("Place"),
            Err(HbnbError::MalformedKey { .. })
        ));
        assert!(matches!(
            parse_key("Place."),
            Err(HbnbError::MalformedKey { .. })
        ));
        assert!(matches!(
            parse_key("Galaxy.1"),
            Err(HbnbError::UnknownKind { .. })
        ));
    }

    #[test]
    fn test_parents_precede_children() {
        let pos = |k: Kind| Kind::ALL.iter().position(|x| *x == k).unwrap();
        assert!(pos(Kind::State) < pos(Kind::City));
        assert!(pos(Kind::City) < pos(Kind::Place));
        assert!(pos(Kind::User) < pos(Kind::Place));
        assert!(pos(Kind::Place) < pos(Kind::Review));
    }
}
