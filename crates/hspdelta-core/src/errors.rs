use hspdelta_core_types::RequestId;
use thiserror::Error;

/// Result type alias using HspError
pub type Result<T> = std::result::Result<T, HspError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code used in structured log events and
/// in the message printed when a run aborts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Remote service
    /// The service answered with a non-success HTTP status
    Service,
    /// A lookup returned an empty result collection
    NotFound,
    /// The request never produced a response (DNS, connect, TLS, body read)
    Transport,

    // Snapshot content
    /// A raw snapshot lacks a required field or has the wrong shape
    MalformedSnapshot,
    /// A package descriptor matches neither supported grammar
    UnparsableVersion,

    // Caller input
    InvalidInput,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::Service => "ERR_SERVICE",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Transport => "ERR_TRANSPORT",
            ExErrorKind::MalformedSnapshot => "ERR_MALFORMED_SNAPSHOT",
            ExErrorKind::UnparsableVersion => "ERR_UNPARSABLE_VERSION",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling and context for
/// the operator reading the failure.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            request_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context (host id, profile id, field name, descriptor)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for a report run
///
/// Every variant is fatal for the current run: there is no retry and no
/// partial-results mode.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HspError {
    /// The service responded with a non-success status
    #[error("bad response from server: {status} ({url})")]
    Service { status: u16, url: String },

    /// A lookup produced no results
    #[error("no results found for {what}")]
    NotFound { what: String },

    /// The request failed before any response was received
    #[error("request failed: {message}")]
    Transport { message: String },

    /// A raw snapshot is missing a required field or has the wrong shape
    #[error("malformed snapshot field `{field}`: {reason}")]
    MalformedSnapshot { field: String, reason: String },

    /// A package descriptor could not be split into name and VRA
    #[error("unparsable package version string: {descriptor:?}")]
    UnparsableVersion { descriptor: String },

    /// Caller-supplied input was rejected
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// JSON encoding or decoding failed
    #[error("serialization error: {message}")]
    Serialization { message: String },
}

impl HspError {
    /// Shorthand for a malformed-snapshot error
    pub fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        HspError::MalformedSnapshot {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for a not-found error
    pub fn not_found(what: impl Into<String>) -> Self {
        HspError::NotFound { what: what.into() }
    }
}

/// Conversion from HspError to the structured facility
impl From<HspError> for ExError {
    fn from(err: HspError) -> Self {
        let message = err.to_string();
        match err {
            HspError::Service { url, .. } => ExError::new(ExErrorKind::Service)
                .with_entity_id(url)
                .with_message(message),
            HspError::NotFound { .. } => {
                ExError::new(ExErrorKind::NotFound).with_message(message)
            }
            HspError::Transport { .. } => {
                ExError::new(ExErrorKind::Transport).with_message(message)
            }
            HspError::MalformedSnapshot { field, .. } => {
                ExError::new(ExErrorKind::MalformedSnapshot)
                    .with_entity_id(field)
                    .with_message(message)
            }
            HspError::UnparsableVersion { descriptor } => {
                ExError::new(ExErrorKind::UnparsableVersion)
                    .with_entity_id(descriptor)
                    .with_message(message)
            }
            HspError::InvalidInput { .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(message)
            }
            HspError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to HspError
impl From<serde_json::Error> for HspError {
    fn from(err: serde_json::Error) -> Self {
        HspError::Serialization {
            message: err.to_string(),
        }
    }
}
