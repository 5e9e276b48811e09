//! Request extractors shared by handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::convert::Infallible;

use crate::domain::RequestContext;
use crate::state::AppState;

/// Lets handlers take a [`RequestContext`] built with the configured forward header.
impl FromRequestParts<AppState> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(RequestContext::from_parts(parts, &state.forward_header))
    }
}
