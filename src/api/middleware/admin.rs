//! Admin authorization gate.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{domain::RequestContext, error::AppError, state::AppState};

/// Requires an administrative session before running the inner handler.
///
/// # Errors
///
/// - `401 Unauthorized` with `errorCode = NotLoggedIn` if the admin check
///   fails for any reason, including a missing session
/// - `403 Forbidden` with an empty `{}` body if the caller is not an admin
///
/// A failing check never grants access.
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ctx = RequestContext::from_request(&req, &st.forward_header);
    let is_admin = st.admins.is_admin(&ctx).await;
    tracing::debug!(
        "require_admin: {:?} {ctx}",
        is_admin.as_ref().ok()
    );

    match is_admin {
        Err(e) => {
            tracing::error!("require_admin: is_admin: {e}");
            metrics::counter!("gate_rejections_total", "gate" => "admin", "status" => "401")
                .increment(1);
            Err(AppError::NotLoggedIn)
        }
        Ok(false) => {
            metrics::counter!("gate_rejections_total", "gate" => "admin", "status" => "403")
                .increment(1);
            Err(AppError::Forbidden)
        }
        Ok(true) => Ok(next.run(req).await),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::middleware::test_support::{
        body_json, body_text, capture_logs, counting_echo, mock_state,
    };
    use crate::domain::{MockAdminCheck, MockInventory, MockSessionResolver, SessionError};
    use crate::error::ErrorStatus;
    use axum::{Router, body::Body, http::StatusCode, middleware};
    use serde_json::json;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;
    use tracing::Level;

    fn app(admins: MockAdminCheck, calls: &Arc<AtomicUsize>) -> Router {
        let state = mock_state(MockSessionResolver::new(), admins, MockInventory::new());
        Router::new()
            .route("/admin", counting_echo(calls.clone()))
            .route_layer(middleware::from_fn_with_state(state, layer))
    }

    fn request() -> Request {
        axum::http::Request::get("/admin")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_non_admin_is_forbidden_with_empty_body() {
        let mut admins = MockAdminCheck::new();
        admins.expect_is_admin().times(1).returning(|_| Ok(false));
        let calls = Arc::new(AtomicUsize::new(0));

        let response = app(admins, &calls).oneshot(request()).await.unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_json(response).await, json!({}));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_check_error_is_unauthenticated_not_forbidden() {
        let mut admins = MockAdminCheck::new();
        admins
            .expect_is_admin()
            .times(1)
            .returning(|_| Err(SessionError::NotLoggedIn));
        let calls = Arc::new(AtomicUsize::new(0));
        let (logs, _guard) = capture_logs(Level::ERROR);

        let response = app(admins, &calls).oneshot(request()).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(response).await,
            json!({ "errorCode": ErrorStatus::NotLoggedIn as i64 })
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(logs.contents().contains("require_admin: is_admin: not logged in"));
    }

    #[tokio::test]
    async fn test_admin_delegates_once() {
        let mut admins = MockAdminCheck::new();
        admins.expect_is_admin().times(1).returning(|_| Ok(true));
        let calls = Arc::new(AtomicUsize::new(0));

        let response = app(admins, &calls).oneshot(request()).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "GET /admin x-custom=- ");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_debug_line_reports_resolved_flag() {
        let mut admins = MockAdminCheck::new();
        admins.expect_is_admin().times(1).returning(|_| Ok(false));
        let calls = Arc::new(AtomicUsize::new(0));
        let (logs, _guard) = capture_logs(Level::DEBUG);

        app(admins, &calls).oneshot(request()).await.unwrap();

        assert!(logs.contents().contains("require_admin: Some(false) - GET /admin HTTP/1.1"));
    }
}
