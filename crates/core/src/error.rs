//! Unified error types for ghactions.
//!
//! Every action reports failures through [`Error`]. The binary turns any
//! error into a `::error::` workflow command and exit status 1.

use thiserror::Error;

/// All ghactions errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or inconsistent configuration
    #[error("{0}")]
    Configuration(String),

    /// A required action input was not provided
    #[error("Input required and not supplied: {0}")]
    MissingInput(String),

    /// The GitHub API answered with a non-success status
    #[error("GitHub API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message from the response body, or the status reason
        message: String,
    },

    /// The request never produced a response (DNS, TLS, timeout, ...)
    #[error("transport error: {0}")]
    Transport(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The action ran but its check did not pass
    #[error("{0}")]
    Validation(String),

    /// Internal error (bug or invariant violation)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for ghactions operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }

    /// Configuration problems are fatal before any API call is made.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration(_) | Error::MissingInput(_))
    }

    /// Failure to fetch data from the remote API.
    ///
    /// These are the errors an `ignore-errors` policy may swallow.
    pub fn is_fetch(&self) -> bool {
        matches!(self, Error::Api { .. } | Error::Transport(_))
    }

    /// 404 from the API
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Api { status: 404, .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
