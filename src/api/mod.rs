//! HTTP API layer.
//!
//! # Modules
//!
//! - [`dto`] - Response bodies
//! - [`extract`] - Extractors shared by handlers
//! - [`handlers`] - Terminal request handlers
//! - [`middleware`] - Request gates
//! - [`routes`] - Route groups

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;
