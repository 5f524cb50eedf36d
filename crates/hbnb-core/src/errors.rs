use thiserror::Error;

/// Result type alias using HbnbError
pub type Result<T> = std::result::Result<T, HbnbError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every error that crosses the storage facade is classified by one of these
/// kinds. Each kind maps to a stable code usable by the CLI, by tests and by
/// any outer layer that must not depend on backend-specific error shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HbErrorKind {
    // Storage contract
    /// Lookup or delete of a key absent from the identity map
    NotFound,
    /// A record carries an unknown or missing kind tag, or malformed attributes
    Schema,
    /// The durable file of the file backend cannot be parsed
    CorruptStorage,
    /// A commit was rejected (missing required attribute, dangling foreign key)
    ConstraintViolation,
    /// The relational engine could not be reached, or the session is closed
    Connection,

    // Input
    InvalidInput,

    // Integration/IO
    Io,
    Serialization,
    Persistence,

    // Internal
    Internal,
}

impl HbErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            HbErrorKind::NotFound => "ERR_NOT_FOUND",
            HbErrorKind::Schema => "ERR_SCHEMA",
            HbErrorKind::CorruptStorage => "ERR_CORRUPT_STORAGE",
            HbErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            HbErrorKind::Connection => "ERR_CONNECTION",
            HbErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            HbErrorKind::Io => "ERR_IO",
            HbErrorKind::Serialization => "ERR_SERIALIZATION",
            HbErrorKind::Persistence => "ERR_PERSISTENCE",
            HbErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification plus enough context (operation, identity key,
/// backend) to report the failure without knowing which store produced it.
#[derive(Debug, Clone)]
pub struct HbError {
    kind: HbErrorKind,
    op: Option<String>,
    entity_key: Option<String>,
    backend: Option<&'static str>,
    message: String,
    source: Option<Box<HbError>>,
}

impl HbError {
    /// Create a new error with the specified kind
    pub fn new(kind: HbErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_key: None,
            backend: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add identity-map key context (`<Kind>.<id>`)
    pub fn with_entity_key(mut self, key: impl Into<String>) -> Self {
        self.entity_key = Some(key.into());
        self
    }

    /// Add backend context (`file` or `db`)
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: HbError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> HbErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_key(&self) -> Option<&str> {
        self.entity_key.as_deref()
    }

    pub fn backend(&self) -> Option<&'static str> {
        self.backend
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&HbError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for HbError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(backend) = self.backend {
            write!(f, " {} backend", backend)?;
        }
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(key) = &self.entity_key {
            write!(f, " (key: {})", key)?;
        }
        Ok(())
    }
}

impl std::error::Error for HbError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Detailed error taxonomy for model and codec operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HbnbError {
    // ===== Schema Errors =====
    /// Record tag names no registered Kind
    #[error("Unknown kind tag: {tag}")]
    UnknownKind { tag: String },

    /// Record has no kind tag at all
    #[error("Record is missing the kind tag")]
    MissingKindTag,

    /// Identity key is not of the form `<Kind>.<id>`
    #[error("Malformed identity key: {key}")]
    MalformedKey { key: String },

    /// Identity key disagrees with the record it indexes
    #[error("Identity key {key} does not match record {actual}")]
    KeyMismatch { key: String, actual: String },

    /// An attribute has the wrong primitive type or the record is not an object
    #[error("Invalid {kind} record: {reason}")]
    InvalidRecord { kind: String, reason: String },

    /// Timestamp text does not follow the fixed format
    #[error("Invalid timestamp '{value}'")]
    InvalidTimestamp { value: String },

    /// updated_at precedes created_at
    #[error("Entity {key} has updated_at earlier than created_at")]
    TimestampOrder { key: String },

    // ===== Constraint Errors =====
    /// A required attribute is unset at commit time
    #[error("Entity {key} is missing required attribute '{attribute}'")]
    MissingAttribute { key: String, attribute: String },

    /// A numeric attribute is NaN or infinite, which no store can represent
    #[error("Entity {key} has a non-finite value for '{attribute}'")]
    NonFiniteAttribute { key: String, attribute: String },

    // ===== Lookup Errors =====
    /// Entity not present in the identity map
    #[error("No instance found: {key}")]
    EntityNotFound { key: String },

    // ===== Generic Errors =====
    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

/// Conversion from HbnbError to HbError
impl From<HbnbError> for HbError {
    fn from(err: HbnbError) -> Self {
        let message = err.to_string();
        match err {
            HbnbError::UnknownKind { .. }
            | HbnbError::MissingKindTag
            | HbnbError::InvalidRecord { .. }
            | HbnbError::InvalidTimestamp { .. } => {
                HbError::new(HbErrorKind::Schema).with_message(message)
            }

            HbnbError::MalformedKey { key }
            | HbnbError::KeyMismatch { key, .. }
            | HbnbError::TimestampOrder { key } => HbError::new(HbErrorKind::Schema)
                .with_entity_key(key)
                .with_message(message),

            HbnbError::MissingAttribute { key, .. } => {
                HbError::new(HbErrorKind::ConstraintViolation)
                    .with_op("validate_required")
                    .with_entity_key(key)
                    .with_message(message)
            }

            HbnbError::NonFiniteAttribute { key, .. } => {
                HbError::new(HbErrorKind::ConstraintViolation)
                    .with_op("validate_representable")
                    .with_entity_key(key)
                    .with_message(message)
            }

            HbnbError::EntityNotFound { key } => HbError::new(HbErrorKind::NotFound)
                .with_entity_key(key)
                .with_message(message),

            HbnbError::Serialization { .. } => {
                HbError::new(HbErrorKind::Serialization).with_message(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes_are_stable() {
        assert_eq!(HbErrorKind::NotFound.code(), "ERR_NOT_FOUND");
        assert_eq!(HbErrorKind::Schema.code(), "ERR_SCHEMA");
        assert_eq!(HbErrorKind::CorruptStorage.code(), "ERR_CORRUPT_STORAGE");
        assert_eq!(
            HbErrorKind::ConstraintViolation.code(),
            "ERR_CONSTRAINT_VIOLATION"
        );
        assert_eq!(HbErrorKind::Connection.code(), "ERR_CONNECTION");
    }

    #[test]
    fn test_display_includes_context() {
        let err = HbError::new(HbErrorKind::NotFound)
            .with_backend("file")
            .with_op("delete")
            .with_entity_key("User.42")
            .with_message("No instance found");

        let text = err.to_string();
        assert!(text.starts_with("[ERR_NOT_FOUND]"));
        assert!(text.contains("file backend"));
        assert!(text.contains("'delete'"));
        assert!(text.contains("User.42"));
    }

    #[test]
    fn test_unknown_kind_maps_to_schema() {
        let err: HbError = HbnbError::UnknownKind {
            tag: "Spaceship".to_string(),
        }
        .into();
        assert_eq!(err.kind(), HbErrorKind::Schema);
        assert!(err.message().contains("Spaceship"));
    }

    #[test]
    fn test_missing_attribute_maps_to_constraint_violation() {
        let err: HbError = HbnbError::MissingAttribute {
            key: "User.1".to_string(),
            attribute: "email".to_string(),
        }
        .into();
        assert_eq!(err.kind(), HbErrorKind::ConstraintViolation);
        assert_eq!(err.entity_key(), Some("User.1"));
    }

    #[test]
    fn test_entity_not_found_maps_to_not_found() {
        let err: HbError = HbnbError::EntityNotFound {
            key: "State.x".to_string(),
        }
        .into();
        assert_eq!(err.kind(), HbErrorKind::NotFound);
        assert_eq!(err.entity_key(), Some("State.x"));
    }

    #[test]
    fn test_non_finite_attribute_maps_to_constraint_violation() {
        let err: HbError = HbnbError::NonFiniteAttribute {
            key: "Place.p".to_string(),
            attribute: "latitude".to_string(),
        }
        .into();
        assert_eq!(err.kind(), HbErrorKind::ConstraintViolation);
        assert!(err.message().contains("latitude"));
    }

    #[test]
    fn test_source_chain() {
        let inner = HbError::new(HbErrorKind::Io).with_message("disk full");
        let outer = HbError::new(HbErrorKind::Persistence).with_source(inner);
        assert_eq!(
            outer.source_error().map(|e| e.kind()),
            Some(HbErrorKind::Io)
        );
        assert!(std::error::Error::source(&outer).is_some());
    }
}
