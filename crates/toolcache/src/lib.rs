//! Runner tool cache and tool installers
//!
//! - [`ToolCache`]: `RUNNER_TOOL_CACHE` layout with completion markers
//! - [`MavenInstaller`]: resolves, downloads and caches Apache Maven

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod error;
pub mod maven;

pub use cache::{runner_arch, ToolCache};
pub use error::ToolCacheError;
pub use maven::{MavenInstall, MavenInstaller};
