use serde::{Deserialize, Serialize};

use super::amenity::Amenity;
use super::base::BaseModel;

/// A listing: belongs to a City and a User, links to many Amenities
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Place {
    #[serde(flatten)]
    pub base: BaseModel,

    /// Required; id of the City the place is in
    pub city_id: String,

    /// Required; id of the owning User
    pub user_id: String,

    /// Required
    pub name: String,

    pub description: String,
    pub number_rooms: i64,
    pub number_bathrooms: i64,
    pub max_guest: i64,
    pub price_by_night: i64,
    pub latitude: f64,
    pub longitude: f64,

    /// Linked Amenity ids, each at most once
    pub amenity_ids: Vec<String>,
}

impl Place {
    pub fn new(
        city_id: impl Into<String>,
        user_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            city_id: city_id.into(),
            user_id: user_id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Link an amenity. Returns false if it was already linked.
    pub fn add_amenity(&mut self, amenity: &Amenity) -> bool {
        self.link_amenity_id(&amenity.base.id)
    }

    /// Link an amenity by id. Returns false if it was already linked.
    pub fn link_amenity_id(&mut self, amenity_id: &str) -> bool {
        if self.has_amenity(amenity_id) {
            return false;
        }
        self.amenity_ids.push(amenity_id.to_string());
        true
    }

    /// Unlink an amenity by id. Returns false if it was not linked.
    pub fn remove_amenity(&mut self, amenity_id: &str) -> bool {
        let before = self.amenity_ids.len();
        self.amenity_ids.retain(|id| id != amenity_id);
        self.amenity_ids.len() != before
    }

    pub fn has_amenity(&self, amenity_id: &str) -> bool {
        self.amenity_ids.iter().any(|id| id == amenity_id)
    }
}
