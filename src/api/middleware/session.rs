//! Session authentication gate.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{domain::RequestContext, error::AppError, state::AppState};

/// Requires an active session before running the inner handler.
///
/// # Flow
///
/// 1. Resolve the session identity via [`crate::domain::SessionResolver`]
/// 2. Reject if resolution failed or the identity is empty
/// 3. Otherwise continue with the request untouched
///
/// # Errors
///
/// Returns `401 Unauthorized` with `errorCode = NotLoggedIn` if:
/// - The session store reports an error
/// - The request carries no active session
///
/// Both cases look identical to the caller.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::api::middleware::session;
///
/// let protected = Router::new()
///     .route("/user/me", get(me_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), session::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ctx = RequestContext::from_request(&req, &st.forward_header);
    tracing::debug!("require_session: {ctx}");

    let email = st.sessions.resolve(&ctx).await.map_err(|e| {
        tracing::debug!("require_session: resolve failed: {e}");
        reject()
    })?;

    if email.is_empty() {
        return Err(reject());
    }

    Ok(next.run(req).await)
}

fn reject() -> AppError {
    metrics::counter!("gate_rejections_total", "gate" => "session", "status" => "401")
        .increment(1);
    AppError::NotLoggedIn
}
