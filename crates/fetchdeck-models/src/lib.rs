//! Shared data models for the Fetchdeck console core.
//!
//! Wire shapes match the remote task-admin service: lowercase string enums,
//! JSON-object token maps with display-significant ordering, and the
//! `{detail: ...}` error payload convention.

pub mod api;
pub mod auth;
pub mod task;
pub mod token_set;

pub use api::{Ack, ErrorBody, ErrorDetail, LocSegment, ValidationItem};
pub use auth::{ChangePasswordRequest, LoginRequest, Token};
pub use task::{
    EnigxConfig, FetchAuthToken, FetchConfig, FetchDataType, FetchMethod, FetchTokenType,
    TaskConfig, TaskConfigRead, TaskType, rezponza_fetch_template,
};
pub use token_set::{TokenSet, TokenSetError};
