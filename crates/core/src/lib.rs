//! Core layer shared by every ghactions step
//!
//! This crate provides:
//! - Run types: [`RunId`], [`RunStatus`], [`RunRecord`]
//! - The unified [`Error`] type
//! - Capability traits ([`RunSource`], [`GitHubApi`]) implemented by the
//!   REST client and by test fakes
//! - Runner plumbing: [`Environment`] (inputs), [`GitHubContext`]
//!   (repository, run, payload), [`ActionRunner`] (outputs, env, path,
//!   state) and workflow-command [`logging`]

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod commands;
pub mod context;
pub mod env;
pub mod error;
pub mod logging;
pub mod traits;
pub mod types;

pub use commands::ActionRunner;
pub use context::GitHubContext;
pub use env::Environment;
pub use error::{Error, Result};
pub use traits::{GitHubApi, RunSource};
pub use types::{RunId, RunRecord, RunStatus};
