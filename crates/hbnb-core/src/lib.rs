//! HBnB Core - entity model, codec and shared facilities
//!
//! This crate provides the backend-independent half of the persistence
//! subsystem:
//! - The six entity Kinds (User, State, City, Place, Review, Amenity) sharing
//!   one embedded `BaseModel`
//! - The record codec with its explicit Kind registry and fixed timestamp format
//! - Commit-time validation and cascade-delete rules used by both stores
//! - The structured error facility and the logging facility

pub mod codec;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod rules;

// The logging macros reach the schema constants through this path.
pub use hbnb_core_types;

// Re-export commonly used types
pub use codec::{deserialize, serialize, Record};
pub use errors::{HbError, HbErrorKind, HbnbError, Result};
pub use model::{
    identity_key, Amenity, BaseModel, City, Entity, Kind, Place, Review, State, User,
};
