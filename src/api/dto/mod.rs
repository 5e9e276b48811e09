//! Data Transfer Objects for API responses.
//!
//! Error bodies live in [`crate::error::ErrorReply`].

pub mod inventory;
pub mod user;
pub mod version;
