//! Error types for repocache

use std::fmt;

/// Result type alias for repocache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for repository lookups
#[derive(Debug)]
pub enum Error {
    /// The repository source failed to deliver a page
    Source(String),

    /// A page payload could not be decoded
    Parse(String),

    /// Cache construction failed
    Cache(lrucache::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Source(msg) => write!(f, "Source error: {}", msg),
            Error::Parse(msg) => write!(f, "Parse error: {}", msg),
            Error::Cache(e) => write!(f, "Cache error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Cache(e) => Some(e),
            _ => None,
        }
    }
}

impl From<lrucache::Error> for Error {
    fn from(err: lrucache::Error) -> Self {
        Error::Cache(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err.to_string())
    }
}
