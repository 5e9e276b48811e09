//! Session collaborators consumed by the authentication and admin gates.

use async_trait::async_trait;
use thiserror::Error;

use super::RequestContext;

/// Failures reported by session collaborators.
///
/// Gates never forward these to callers; every variant becomes a 401.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("malformed session cookie")]
    MalformedCookie,

    #[error("not logged in")]
    NotLoggedIn,

    #[error("user not found: {0}")]
    UserNotFound(String),

    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

/// Resolves the session identity attached to a request.
///
/// # Returns
///
/// - `Ok(identity)` for an active session
/// - `Ok("")` when the request carries no active session
///
/// # Errors
///
/// Returns [`SessionError`] when the session cannot be read at all.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionResolver: Send + Sync {
    async fn resolve(&self, ctx: &RequestContext) -> Result<String, SessionError>;
}

/// Decides whether the caller behind a request holds administrative rights.
///
/// Implementations may require a valid session and report its absence as
/// an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminCheck: Send + Sync {
    async fn is_admin(&self, ctx: &RequestContext) -> Result<bool, SessionError>;
}
