//! Command handlers
//!
//! One module per action. Each module owns the config struct read from the
//! runner environment and a `run` function returning an [`Output`](crate::Output).

pub mod add_labels;
pub mod concurrency_disabler;
pub mod conventional_commits;
pub mod pr_status;
pub mod setup_maven;

pub use add_labels::AddLabelsConfig;
pub use concurrency_disabler::DisablerConfig;
pub use conventional_commits::{CommitCheckConfig, CommitReport};
pub use pr_status::PrStatusConfig;
pub use setup_maven::MavenConfig;
