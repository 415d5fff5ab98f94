//! Error types for issuelink-core

use std::borrow::Cow;
use thiserror::Error as ThisError;

/// Result type alias for issuelink operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for issuelink operations
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid configuration (bad pattern, missing input)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pattern compilation error
    #[error("Pattern error: {0}")]
    Pattern(String),

    /// GitHub event payload parsing error
    #[error("Event parse error: {0}")]
    EventParse(String),

    /// HTTP/API error
    #[error("HTTP error: {0}")]
    Http(String),

    /// Requested resource does not exist (or is hidden from the token)
    #[error("Not found: {0}")]
    NotFound(String),

    /// API rate limit exceeded
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Runtime error (Tokio, threading, etc.)
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Other errors
    #[error("Error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // Strip the URL so query strings never leak into diagnostics
        Error::Http(err.without_url().to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Other(format!("JSON error: {}", err))
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::Pattern(err.to_string())
    }
}

/// Fieldless error category for zero-cost pattern matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorKind {
    /// Configuration error
    Config,
    /// Pattern compilation error
    Pattern,
    /// GitHub event parsing error
    EventParse,
    /// HTTP/API error
    Http,
    /// Resource not found
    NotFound,
    /// API rate limit exceeded
    RateLimitExceeded,
    /// I/O operation error
    Io,
    /// Runtime error
    Runtime,
    /// Other errors
    Other,
}

impl Error {
    /// Get the error kind
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_) => ErrorKind::Config,
            Error::Pattern(_) => ErrorKind::Pattern,
            Error::EventParse(_) => ErrorKind::EventParse,
            Error::Http(_) => ErrorKind::Http,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::RateLimitExceeded(_) => ErrorKind::RateLimitExceeded,
            Error::Io(_) => ErrorKind::Io,
            Error::Runtime(_) => ErrorKind::Runtime,
            Error::Other(_) => ErrorKind::Other,
        }
    }

    /// The error message without the category prefix.
    ///
    /// Borrowed for string variants; I/O errors render their cause.
    #[inline]
    pub fn message(&self) -> Cow<'_, str> {
        match self {
            Error::Config(msg)
            | Error::Pattern(msg)
            | Error::EventParse(msg)
            | Error::Http(msg)
            | Error::NotFound(msg)
            | Error::RateLimitExceeded(msg)
            | Error::Runtime(msg)
            | Error::Other(msg) => Cow::Borrowed(msg),
            Error::Io(err) => Cow::Owned(err.to_string()),
        }
    }
}
