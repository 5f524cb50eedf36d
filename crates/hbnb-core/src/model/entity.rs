use std::fmt;

use chrono::{DateTime, Utc};

use super::{identity_key, Amenity, BaseModel, City, Kind, Place, Review, State, User};

/// Any persisted entity
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    User(User),
    State(State),
    City(City),
    Place(Place),
    Review(Review),
    Amenity(Amenity),
}

impl Entity {
    pub fn kind(&self) -> Kind {
        match self {
            Entity::User(_) => Kind::User,
            Entity::State(_) => Kind::State,
            Entity::City(_) => Kind::City,
            Entity::Place(_) => Kind::Place,
            Entity::Review(_) => Kind::Review,
            Entity::Amenity(_) => Kind::Amenity,
        }
    }

    pub fn base(&self) -> &BaseModel {
        match self {
            Entity::User(e) => &e.base,
            Entity::State(e) => &e.base,
            Entity::City(e) => &e.base,
            Entity::Place(e) => &e.base,
            Entity::Review(e) => &e.base,
            Entity::Amenity(e) => &e.base,
        }
    }

    fn base_mut(&mut self) -> &mut BaseModel {
        match self {
            Entity::User(e) => &mut e.base,
            Entity::State(e) => &mut e.base,
            Entity::City(e) => &mut e.base,
            Entity::Place(e) => &mut e.base,
            Entity::Review(e) => &mut e.base,
            Entity::Amenity(e) => &mut e.base,
        }
    }

    pub fn id(&self) -> &str {
        &self.base().id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.base().created_at()
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.base().updated_at()
    }

    /// Identity-map key `<Kind>.<id>`
    pub fn key(&self) -> String {
        identity_key(self.kind(), self.id())
    }

    /// Refresh `updated_at` ahead of a persist
    pub fn touch(&mut self) {
        self.base_mut().touch();
    }

    /// Owning references as (parent Kind, parent id)
    ///
    /// Deleting the parent cascades to this entity. Place-to-Amenity links are
    /// not owning and are not listed here.
    pub fn parents(&self) -> Vec<(Kind, &str)> {
        match self {
            Entity::City(c) => vec![(Kind::State, c.state_id.as_str())],
            Entity::Place(p) => vec![
                (Kind::City, p.city_id.as_str()),
                (Kind::User, p.user_id.as_str()),
            ],
            Entity::Review(r) => vec![
                (Kind::Place, r.place_id.as_str()),
                (Kind::User, r.user_id.as_str()),
            ],
            Entity::User(_) | Entity::State(_) | Entity::Amenity(_) => Vec::new(),
        }
    }

    pub fn as_place(&self) -> Option<&Place> {
        match self {
            Entity::Place(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_place_mut(&mut self) -> Option<&mut Place> {
        match self {
            Entity::Place(p) => Some(p),
            _ => None,
        }
    }
}

/// Console-style rendering: `[<Kind>] (<id>) {attributes}`
impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut record = match crate::codec::serialize(self) {
            Ok(record) => record,
            Err(err) => return write!(f, "[{}] ({}) <{}>", self.kind(), self.id(), err),
        };
        record.remove(crate::codec::KIND_TAG);
        if record.contains("password") {
            record.insert("password", "***REDACTED***");
        }
        write!(f, "[{}] ({}) {}", self.kind(), self.id(), record)
    }
}

macro_rules! impl_from_kind {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Entity {
                fn from(value: $variant) -> Self {
                    Entity::$variant(value)
                }
            }
        )*
    };
}

impl_from_kind!(User, State, City, Place, Review, Amenity);
