//! Entity model
//!
//! One `BaseModel` (id + timestamps) is embedded by value in each Kind
//! struct; `Entity` is the closed sum over the six Kinds.

pub mod amenity;
pub mod base;
pub mod city;
pub mod entity;
pub mod kind;
pub mod place;
pub mod review;
pub mod state;
pub mod user;

pub use amenity::Amenity;
pub use base::BaseModel;
pub use city::City;
pub use entity::Entity;
pub use kind::{identity_key, parse_key, Kind};
pub use place::Place;
pub use review::Review;
pub use state::State;
pub use user::User;
