//! Handler for the version endpoint.

use axum::Json;

use crate::api::dto::version::VersionResponse;

/// Returns the running service version.
///
/// # Endpoint
///
/// `GET /v1/version` (public)
pub async fn version_handler() -> Json<VersionResponse> {
    Json(VersionResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
