//! Handlers for session-scoped user endpoints.

use axum::{Json, extract::State};

use crate::api::dto::user::MeResponse;
use crate::domain::RequestContext;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the identity behind the caller's session.
///
/// # Endpoint
///
/// `GET /v1/user/me` (session required)
///
/// # Response
///
/// ```json
/// { "email": "alice@example.com", "isAdmin": false }
/// ```
///
/// # Errors
///
/// Returns `401` if the session ended after the gate admitted the request.
pub async fn me_handler(
    State(st): State<AppState>,
    ctx: RequestContext,
) -> Result<Json<MeResponse>, AppError> {
    let email = st
        .sessions
        .resolve(&ctx)
        .await
        .map_err(|_| AppError::NotLoggedIn)?;

    if email.is_empty() {
        return Err(AppError::NotLoggedIn);
    }

    let is_admin = match st.admins.is_admin(&ctx).await {
        Ok(is_admin) => is_admin,
        Err(e) => {
            tracing::error!("me: is_admin: {e}");
            false
        }
    };

    Ok(Json(MeResponse { email, is_admin }))
}
