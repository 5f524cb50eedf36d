//! Canonical schema constants for structured logging
//!
//! These constants keep field names consistent between the logging macros,
//! the storage backends, and the tests that assert on captured events.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Storage context
pub const FIELD_BACKEND: &str = "backend";
pub const FIELD_KIND: &str = "kind";
pub const FIELD_ENTITY_KEY: &str = "entity_key";

// Collection sizes
pub const FIELD_OBJECT_COUNT: &str = "object_count";
pub const FIELD_STAGED_COUNT: &str = "staged_count";
pub const FIELD_SKIPPED_COUNT: &str = "skipped_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
