use serde::{Deserialize, Serialize};

use super::base::BaseModel;

/// A city inside a State
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct City {
    #[serde(flatten)]
    pub base: BaseModel,

    /// Required; id of the owning State
    pub state_id: String,

    /// Required
    pub name: String,
}

impl City {
    pub fn new(state_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            state_id: state_id.into(),
            name: name.into(),
            ..Self::default()
        }
    }
}
