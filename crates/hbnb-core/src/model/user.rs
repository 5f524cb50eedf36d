use hbnb_core_types::Sensitive;
use serde::{Deserialize, Serialize};

use super::base::BaseModel;

/// A person who owns places and writes reviews
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(flatten)]
    pub base: BaseModel,

    /// Required
    pub email: String,

    /// Required; redacted in Debug output
    pub password: Sensitive<String>,

    pub first_name: String,
    pub last_name: String,
}

impl User {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Sensitive::new(password.into()),
            ..Self::default()
        }
    }

    /// Set first and last name
    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self
    }
}
