//! Rules shared by both storage backends
//!
//! - `validation`: required and representable attributes, checked at commit time
//! - `cascade`: which entities go when a parent is deleted

pub mod cascade;
pub mod validation;

pub use cascade::{cascade_keys, detach_amenity};
pub use validation::{
    missing_attributes, non_finite_attributes, required_attributes, validate_all,
    validate_representable, validate_required,
};
