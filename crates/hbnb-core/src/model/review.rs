use serde::{Deserialize, Serialize};

use super::base::BaseModel;

/// A user's review of a place
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Review {
    #[serde(flatten)]
    pub base: BaseModel,

    /// Required; id of the reviewed Place
    pub place_id: String,

    /// Required; id of the authoring User
    pub user_id: String,

    /// Required
    pub text: String,
}

impl Review {
    pub fn new(
        place_id: impl Into<String>,
        user_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            place_id: place_id.into(),
            user_id: user_id.into(),
            text: text.into(),
            ..Self::default()
        }
    }
}
