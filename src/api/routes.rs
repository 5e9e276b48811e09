//! API route groups, one per gate combination.
//!
//! Groups are plain routers; [`crate::routes::build_router`] attaches the
//! gates so the whole nesting order is visible in one place.

use crate::api::handlers::{
    inventory_handler, me_handler, refresh_inventory_handler, version_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes open to anonymous callers.
///
/// - `GET /version` - Service version
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/version", get(version_handler))
}

/// Routes that need an active session.
///
/// - `GET /user/me` - Identity behind the session
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/user/me", get(me_handler))
}

/// Routes that need an active session and a loaded inventory.
///
/// - `GET /inventory` - Current inventory snapshot
pub fn inventory_routes() -> Router<AppState> {
    Router::new().route("/inventory", get(inventory_handler))
}

/// Routes restricted to administrators.
///
/// - `POST /admin/inventory/refresh` - Force an inventory reload
pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/admin/inventory/refresh", post(refresh_inventory_handler))
}
