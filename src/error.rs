//! Error type of the typed facade.
//!
//! Action failures are carried as the workspace-wide
//! [`ghactions_core::Error`]; the facade only adds the case where the
//! executor answered with an output of the wrong kind.

use thiserror::Error;

/// All facade errors.
#[derive(Debug, Error)]
pub enum Error {
    /// The action itself failed
    #[error(transparent)]
    Action(#[from] ghactions_core::Error),

    /// The executor returned an output of another kind
    #[error("unexpected output: expected {expected}, got {actual}")]
    UnexpectedOutput {
        /// Output kind the facade asked for
        expected: &'static str,
        /// Output kind received
        actual: &'static str,
    },
}

/// Result type for facade operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this is a configuration error (missing token, bad input).
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Action(e) if e.is_configuration())
    }

    /// Check if this is a failure talking to the API.
    pub fn is_fetch(&self) -> bool {
        matches!(self, Error::Action(e) if e.is_fetch())
    }

    /// The underlying action error, if any.
    pub fn action_error(&self) -> Option<&ghactions_core::Error> {
        match self {
            Error::Action(e) => Some(e),
            Error::UnexpectedOutput { .. } => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Action(e.into())
    }
}
