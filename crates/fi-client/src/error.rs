//! Error types for fi-client.

use crate::response::ApiResponse;

/// Result type alias for fi-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for fi-client operations.
///
/// Precondition failures (`Value`, `Authorization`) are produced before any
/// request is sent. Failures classified from a response carry that response so
/// callers can inspect status, headers and body.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    response: Option<Box<ApiResponse>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            source: None,
            response: None,
        }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
            response: None,
        }
    }

    /// Shorthand for a `Value` error.
    pub fn value(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Value(message.into()))
    }

    /// Build the error delivered for a response outside the success range.
    pub fn status(response: ApiResponse) -> Self {
        let kind = ErrorKind::Http {
            status: response.status,
            message: response.status_text.clone(),
        };
        Self::new(kind).with_response(response)
    }

    /// Attach the normalized response that caused this error.
    pub fn with_response(mut self, response: ApiResponse) -> Self {
        self.response = Some(Box::new(response));
        self
    }

    /// The normalized response, when the error was classified from one.
    pub fn response(&self) -> Option<&ApiResponse> {
        self.response.as_deref()
    }

    /// Take ownership of the attached response.
    pub fn into_response(self) -> Option<ApiResponse> {
        self.response.map(|r| *r)
    }

    /// HTTP status of the attached response, if any.
    pub fn status_code(&self) -> Option<u16> {
        self.response.as_ref().map(|r| r.status)
    }

    /// Returns true for caller precondition failures (missing options,
    /// undetectable Content-Type, malformed instance URL).
    pub fn is_value_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Value(_))
    }

    /// Returns true when an operation needed credentials the session lacks.
    pub fn is_authorization_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Authorization(_))
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Missing or contradictory options supplied by the caller.
    #[error("Value error: {0}")]
    Value(String),

    /// The operation requires a signed-in session.
    #[error("Authorization error: {0}")]
    Authorization(String),

    /// The service answered with a status outside the success range.
    #[error("HTTP error: {status} {message}")]
    Http { status: u16, message: String },

    /// An object lookup by about value or id matched more than one object.
    #[error("Expected a single object, found {matches}")]
    NotUnique { matches: usize },

    /// Request timeout.
    #[error("Request timeout")]
    Timeout,

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Transport failure that is neither a timeout nor a connection error.
    #[error("Transport error: {0}")]
    Transport(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid configuration, including a transport that cannot be built.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Blocking mode could not drive the request.
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else if err.is_connect() {
            ErrorKind::Connection(err.to_string())
        } else if err.is_builder() {
            ErrorKind::Config(err.to_string())
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
        Error::with_source(ErrorKind::Value(format!("Invalid URL: {}", err)), err)
    }
}
