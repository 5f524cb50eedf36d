//! Canonical logging macros
//!
//! These macros provide a structured, consistent way to log storage operations.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use hbnb_core::log_op_start;
/// log_op_start!("save");
/// log_op_start!("delete", entity_key = "State.1");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::hbnb_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::hbnb_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use hbnb_core::log_op_end;
/// log_op_end!("save", duration_ms = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::hbnb_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::hbnb_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// Accepts anything convertible into `HbError` and records its kind and code.
///
/// # Example
///
/// ```
/// # use hbnb_core::{log_op_error, errors::HbnbError};
/// let err = HbnbError::EntityNotFound { key: "User.1".to_string() };
/// log_op_error!("delete", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let hb_err: $crate::errors::HbError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::hbnb_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?hb_err.kind(),
            err.code = hb_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let hb_err: $crate::errors::HbError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::hbnb_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?hb_err.kind(),
            err.code = hb_err.code(),
            $($field)*
        );
    }};
}
