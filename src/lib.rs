//! # ghactions
//!
//! GitHub Actions steps written in Rust.
//!
//! The centrepiece is the concurrency gate: a run of a workflow waits until
//! every older active run of the same workflow has finished, polling the
//! REST API, and gives up after a configurable time. Alongside it live a few
//! small repository steps.
//!
//! ## Quick Start
//!
//! ```ignore
//! use ghactions::prelude::*;
//!
//! let actions = GhActions::from_process();
//! let admission = actions.concurrency_disabler().await?;
//! assert!(matches!(
//!     admission.outcome,
//!     AdmissionOutcome::Turn | AdmissionOutcome::GaveUp
//! ));
//! ```
//!
//! ## Actions
//!
//! - `concurrency-disabler` - wait for the run's turn
//! - `add-labels` - label the issue or pull request
//! - `pr-status` - publish pull-request fields as outputs
//! - `conventional-commits` - lint commit messages
//! - `setup-maven` - install Apache Maven through the tool cache
//!
//! ## Crates
//!
//! - [`ghactions_core`]: environment, context, runner commands, logging, errors
//! - [`ghactions_concurrency`]: wait queue and admission loop
//! - [`ghactions_github`]: REST client
//! - [`ghactions_toolcache`]: tool cache and Maven installer
//! - [`ghactions_executor`]: command dispatch

#![warn(missing_docs)]

mod actions;
mod error;

pub mod prelude;

pub use actions::{GhActions, GhActionsBuilder};
pub use error::{Error, Result};

pub use ghactions_concurrency;
pub use ghactions_core;
pub use ghactions_executor;
pub use ghactions_github;
pub use ghactions_toolcache;
