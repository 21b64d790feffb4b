//! Command execution layer for ghactions
//!
//! Every action is a [`Command`]; the [`Executor`] turns it into an
//! [`Output`] using the runner environment:
//!
//! ```text
//! Environment ──► GitHubContext ──► <Action>Config ──► handler ──► Output
//!                                                        │
//!                                           GitHubApi / ToolCache / ActionRunner
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod command;
mod executor;
pub mod handlers;

#[cfg(test)]
mod tests;

pub use command::{Command, Output};
pub use executor::Executor;
pub use handlers::{
    AddLabelsConfig, CommitCheckConfig, CommitReport, DisablerConfig, MavenConfig, PrStatusConfig,
};

pub use ghactions_core::{Error, Result};
