//! Typed wrappers over the remote task-admin endpoints.
//!
//! Each operation returns `None` when the call failed; the client has
//! already notified the user by then.

pub mod auth;
pub mod runs;
pub mod tasks;
