//! Error responder shared by every gate and handler.
//!
//! Every rejection is written as a JSON [`ErrorReply`] with a fixed status:
//!
//! | Variant                  | Status | Body                          |
//! |--------------------------|--------|-------------------------------|
//! | [`AppError::NotLoggedIn`] | 401    | `{"errorCode": <NotLoggedIn>}` |
//! | [`AppError::Forbidden`]   | 403    | `{}`                          |
//! | [`AppError::Internal`]    | 500    | `{"errorCode": <unix time>}`  |
//!
//! Internal failures never carry their cause to the caller. The cause is
//! logged once, together with the correlation code returned in the body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::domain::RequestContext;

/// Error codes carried in [`ErrorReply::error_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i64)]
pub enum ErrorStatus {
    Invalid = 0,
    NotLoggedIn = 1,
}

impl From<ErrorStatus> for i64 {
    fn from(status: ErrorStatus) -> Self {
        status as i64
    }
}

/// JSON body written on every rejected request.
///
/// A zero error code is omitted, so an empty reply serializes to `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReply {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub error_code: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

fn is_zero(code: &i64) -> bool {
    *code == 0
}

#[derive(Debug, PartialEq, Eq)]
pub enum AppError {
    /// No valid session, or the session check itself failed.
    NotLoggedIn,
    /// Valid session without the required privilege. No error code is sent.
    Forbidden,
    /// Server-side failure. `error_code` correlates the response with the log line.
    Internal { error_code: i64 },
}

impl AppError {
    /// Logs an internal failure and returns the opaque error sent to the caller.
    ///
    /// The error code is the current Unix timestamp, matching the code written
    /// to the error log next to `message` and `cause`.
    pub fn internal(ctx: &RequestContext, message: impl Display, cause: impl Display) -> Self {
        let error_code = Utc::now().timestamp();
        tracing::error!("{ctx} Internal error {error_code}: {message}: {cause}");
        Self::Internal { error_code }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotLoggedIn => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn reply(&self) -> ErrorReply {
        match self {
            AppError::NotLoggedIn => ErrorReply {
                error_code: ErrorStatus::NotLoggedIn.into(),
                error_message: None,
            },
            AppError::Forbidden => ErrorReply::default(),
            AppError::Internal { error_code } => ErrorReply {
                error_code: *error_code,
                error_message: None,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.reply())).into_response()
    }
}
