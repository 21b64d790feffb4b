//! Convenient imports for ghactions.
//!
//! ```ignore
//! use ghactions::prelude::*;
//!
//! let actions = GhActions::builder().env(Environment::from_process()).build();
//! ```

// Main entry point
pub use crate::actions::{GhActions, GhActionsBuilder};

// Error handling
pub use crate::error::{Error, Result};

// Runner plumbing
pub use ghactions_core::{
    ActionRunner, Environment, GitHubApi, GitHubContext, RunId, RunRecord, RunSource, RunStatus,
};

// Concurrency gate
pub use ghactions_concurrency::{
    Admission, AdmissionConfig, AdmissionController, AdmissionOutcome, QueuePosition, WaitQueue,
};

// Dispatch
pub use ghactions_executor::{Command, Executor, Output};

// Re-export serde_json for convenience
pub use serde_json::json;
