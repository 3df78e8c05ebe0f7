//! Command implementations.
//!
//! Every remote failure has already been surfaced through the alert sink by
//! the core client, so commands translate `None` into a nonzero exit code
//! without printing anything further.

pub mod auth;
pub mod run;
pub mod task;
