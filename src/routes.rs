//! Top-level router configuration and gate ordering.
//!
//! # Route Structure
//!
//! | Route                              | Gates (outermost first)                 |
//! |------------------------------------|-----------------------------------------|
//! | `GET  /v1/version`                 | close_body, logging                     |
//! | `GET  /v1/user/me`                 | close_body, logging, session            |
//! | `GET  /v1/inventory`               | close_body, logging, session, inventory |
//! | `POST /v1/admin/inventory/refresh` | close_body, logging, admin              |
//!
//! Unknown routes still pass through close_body and logging before the 404.

use crate::api;
use crate::api::middleware::{admin, close_body, inventory, logging, session};
use crate::state::AppState;
use axum::{Router, middleware};
use tower::{Layer, ServiceBuilder};
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the gated router.
pub fn build_router(state: AppState) -> Router {
    let user_router = api::routes::user_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), session::layer));

    let inventory_router = api::routes::inventory_routes().route_layer(
        ServiceBuilder::new()
            .layer(middleware::from_fn_with_state(state.clone(), session::layer))
            .layer(middleware::from_fn_with_state(state.clone(), inventory::layer)),
    );

    let admin_router = api::routes::admin_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), admin::layer));

    let v1 = api::routes::public_routes()
        .merge(user_router)
        .merge(inventory_router)
        .merge(admin_router);

    Router::new().nest("/v1", v1).with_state(state.clone()).layer(
        ServiceBuilder::new()
            .layer(middleware::from_fn(close_body::layer))
            .layer(middleware::from_fn_with_state(state, logging::layer)),
    )
}

/// Gated router with trailing slashes trimmed before routing.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state))
}
