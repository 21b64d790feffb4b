//! Executor tests: dispatch through [`Executor`](crate::Executor) against
//! an in-memory GitHub.

mod fake;
