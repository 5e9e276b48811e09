//! Helper functions shared by collaborators and gates.
//!
//! - [`cookie`] - Cookie lookup in request headers

pub mod cookie;
