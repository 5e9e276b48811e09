//! Request gates.
//!
//! Each gate is an axum middleware function; wrapped with
//! [`axum::middleware::from_fn_with_state`] it becomes a `tower::Layer`
//! turning an inner service into one with the same signature. A gate either
//! delegates with the request untouched and returns the inner response as-is,
//! or short-circuits with an [`crate::error::AppError`] and never calls the
//! inner service.
//!
//! # Gates
//!
//! - [`close_body`] - releases the request body after the inner service returns
//! - [`logging`] - trace dump and one-line access log; never rejects
//! - [`session`] - 401 unless the caller has an active session
//! - [`admin`] - 401 if the check fails, 403 if the caller is not an admin
//! - [`inventory`] - 500 if the shared inventory cannot be loaded
//!
//! # Ordering
//!
//! Gates run strictly in nesting order. [`close_body`] must sit outside every
//! gate that reads the body, [`logging`] included. Authorization gates run
//! before any privileged handler logic. See [`crate::routes::app_router`].

pub mod admin;
pub mod close_body;
pub mod inventory;
pub mod logging;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;
