use serde::{Deserialize, Serialize};

use super::base::BaseModel;

/// A feature shared by many places (Wifi, Pool, ...)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Amenity {
    #[serde(flatten)]
    pub base: BaseModel,

    /// Required
    pub name: String,
}

impl Amenity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}
