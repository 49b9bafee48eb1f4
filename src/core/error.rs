//! Core error types.

use std::fmt;

/// Errors raised while reading a request.
///
/// Missing headers, query args, cookies or params are not errors; accessors
/// return empty values for those.
#[derive(Debug)]
pub enum Error {
    /// Request body is not valid JSON or does not fit the target type.
    Deserialization(serde_json::Error),

    /// Request could not be read from the transport.
    InvalidRequest(String),
}

impl Error {
    /// Check if this is a body deserialization error.
    #[inline]
    pub fn is_deserialization(&self) -> bool {
        matches!(self, Error::Deserialization(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Deserialization(e) => write!(f, "deserialization error: {}", e),
            Error::InvalidRequest(msg) => write!(f, "invalid request: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Deserialization(e) => Some(e),
            Error::InvalidRequest(_) => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Deserialization(e)
    }
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
