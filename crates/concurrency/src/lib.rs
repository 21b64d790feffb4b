//! Concurrency gate for workflow runs
//!
//! This crate implements client-side admission control between runs of the
//! same workflow:
//! - [`WaitQueue`]: FIFO snapshot of active runs ordered by run ID
//! - [`AdmissionController`]: polling loop that waits for the head of the
//!   queue or gives up after a maximum wait

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod admission;
pub mod queue;

pub use admission::{
    Admission, AdmissionConfig, AdmissionController, AdmissionOutcome, DEFAULT_MAX_WAIT,
    DEFAULT_POLL_INTERVAL, MAX_POSITIONS,
};
pub use queue::{Observation, QueuePosition, WaitQueue};
