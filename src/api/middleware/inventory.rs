//! Precondition loader gate for inventory-backed routes.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{domain::RequestContext, error::AppError, state::AppState};

/// Ensures the shared inventory is loaded and fresh before the inner handler runs.
///
/// The first request after startup or invalidation pays the load cost;
/// later requests hit the cached snapshot.
///
/// # Errors
///
/// Returns `500 Internal Server Error` with an opaque correlation code if the
/// inventory cannot be loaded. The cause is written to the error log only.
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Err(e) = st.inventory.ensure_loaded().await {
        let ctx = RequestContext::from_request(&req, &st.forward_header);
        metrics::counter!("gate_rejections_total", "gate" => "inventory", "status" => "500")
            .increment(1);
        return Err(AppError::internal(&ctx, "failed to load inventory", e));
    }

    Ok(next.run(req).await)
}
