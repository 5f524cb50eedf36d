//! Core types shared across the HBnB persistence crates
//!
//! - **Schema constants**: canonical structured-logging field keys and event names
//! - **Sensitive data**: `Sensitive<T>` marker that redacts itself in Debug/Display

pub mod schema;
pub mod sensitive;

pub use sensitive::Sensitive;
