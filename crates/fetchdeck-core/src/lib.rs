//! Client-side orchestration core for the Fetchdeck console.
//!
//! Everything here sits between an external presentation layer and the remote
//! task-admin service: the [`ApiClient`] owns request dispatch and failure
//! classification, [`TaskEditor`] owns the in-memory task model and its
//! mutation operations, and [`RunController`] bridges a persisted task's
//! remote execution state (run trigger, schedule toggle, log polling) into
//! the session.

pub mod alert;
pub mod client;
pub mod control;
pub mod editor;
pub mod services;
pub mod session;

pub use alert::{Alert, AlertKind, AlertOverride, AlertSink};
pub use client::{ApiClient, Download};
pub use control::{DEFAULT_LOG_POLL_INTERVAL, LogWatch, RunController};
pub use editor::{EditorMode, SaveOutcome, TaskEditor};
pub use session::Session;
