//! Tool cache errors

use thiserror::Error;

/// Errors raised while resolving, downloading or caching a tool
#[derive(Debug, Error)]
pub enum ToolCacheError {
    /// No usable version could be determined
    #[error("{0}")]
    VersionNotFound(String),

    /// The runner architecture has no matching distribution
    #[error("Architecture not supported: {0}")]
    UnsupportedArch(String),

    /// Download answered with a non-success status
    #[error("download of {url} failed with HTTP {status}")]
    Download {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// The archive did not contain the expected directory
    #[error("archive layout unexpected: {0} not found")]
    MissingEntry(String),

    /// Transport failure
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Filesystem failure
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for tool cache operations
pub type Result<T> = std::result::Result<T, ToolCacheError>;

impl From<ToolCacheError> for ghactions_core::Error {
    fn from(e: ToolCacheError) -> Self {
        use ghactions_core::Error as CoreError;
        match e {
            ToolCacheError::VersionNotFound(msg) => CoreError::Configuration(msg),
            ToolCacheError::UnsupportedArch(arch) => {
                CoreError::Configuration(format!("Architecture not supported: {}", arch))
            }
            ToolCacheError::Download { url, status } => CoreError::Api {
                status,
                message: format!("download of {} failed", url),
            },
            ToolCacheError::MissingEntry(entry) => {
                CoreError::Internal(format!("archive layout unexpected: {} not found", entry))
            }
            ToolCacheError::Http(err) => CoreError::Transport(err.to_string()),
            ToolCacheError::Io(err) => CoreError::Io(err),
        }
    }
}
