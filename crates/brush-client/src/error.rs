//! Error types for brush-client.

/// Result type alias for brush operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for brush operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Shorthand for a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config(message.into()))
    }

    /// Shorthand for an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument(message.into()))
    }

    /// Returns true if the remote side reported the resource missing, or a
    /// finder that must match came back empty.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::NotFound(_))
    }

    /// Returns true for 401 and 403 outcomes.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::Unauthorized(_) | ErrorKind::Forbidden { .. }
        )
    }

    /// Returns true if the object was used after `destroy`.
    pub fn is_destroyed(&self) -> bool {
        matches!(self.kind, ErrorKind::Destroyed)
    }

    /// HTTP status associated with this error, when there is one.
    pub fn status(&self) -> Option<u16> {
        self.kind.status()
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Missing or malformed binding configuration. Raised before any request.
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP 404, or a strict finder without a match.
    #[error("Not found: {0}")]
    NotFound(String),

    /// HTTP 401.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// HTTP 403.
    #[error("Forbidden: not authorized to {method} {url}")]
    Forbidden { method: String, url: String },

    /// Any other status above 400, or an undecodable success body.
    #[error("Remote error: {status} {message}")]
    Remote { status: u16, message: String },

    /// Network-level failure reported by the transport.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The transport gave up waiting.
    #[error("Request timeout")]
    Timeout,

    /// Encoding a request body failed.
    #[error("JSON error: {0}")]
    Json(String),

    /// The caller passed something the operation cannot work with.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The object was destroyed and can no longer be read or written.
    #[error("Object has been destroyed")]
    Destroyed,
}

impl ErrorKind {
    /// HTTP status implied by this kind.
    pub fn status(&self) -> Option<u16> {
        match self {
            ErrorKind::NotFound(_) => Some(404),
            ErrorKind::Unauthorized(_) => Some(401),
            ErrorKind::Forbidden { .. } => Some(403),
            ErrorKind::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else {
            ErrorKind::Transport(err.to_string())
        };

        Error::with_source(kind, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::Config(format!("Invalid URL: {}", err)), err)
    }
}
