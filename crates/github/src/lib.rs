//! GitHub REST access for ghactions
//!
//! [`GitHubClient`] implements the [`ghactions_core::RunSource`] and
//! [`ghactions_core::GitHubApi`] capabilities over the REST API.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod error;
pub mod models;

pub use client::GitHubClient;
pub use error::GitHubError;
