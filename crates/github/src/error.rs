//! Client-level errors and their mapping onto [`ghactions_core::Error`]

use thiserror::Error;

/// Errors raised by [`crate::GitHubClient`]
#[derive(Debug, Error)]
pub enum GitHubError {
    /// The token cannot be used as a header value
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// Non-success HTTP status
    #[error("HTTP {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// API error message
        message: String,
    },

    /// Transport or decoding failure
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, GitHubError>;

impl From<GitHubError> for ghactions_core::Error {
    fn from(e: GitHubError) -> Self {
        use ghactions_core::Error as CoreError;
        match e {
            GitHubError::InvalidToken(msg) => CoreError::Configuration(msg),
            GitHubError::Api { status, message } => CoreError::Api { status, message },
            GitHubError::Http(err) if err.is_decode() => {
                CoreError::Serialization(err.to_string())
            }
            GitHubError::Http(err) => CoreError::Transport(err.to_string()),
        }
    }
}
