//! Handlers for inventory endpoints.

use axum::{Json, extract::State};

use crate::api::dto::inventory::{InventoryResponse, RefreshResponse};
use crate::domain::RequestContext;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the current inventory snapshot.
///
/// # Endpoint
///
/// `GET /v1/inventory` (session required, inventory preloaded)
pub async fn inventory_handler(
    State(st): State<AppState>,
    ctx: RequestContext,
) -> Result<Json<InventoryResponse>, AppError> {
    let snapshot = st
        .inventory
        .snapshot()
        .await
        .ok_or_else(|| AppError::internal(&ctx, "inventory snapshot", "not loaded"))?;

    Ok(Json(InventoryResponse::from(snapshot.as_ref())))
}

/// Drops the cached inventory and loads it again.
///
/// # Endpoint
///
/// `POST /v1/admin/inventory/refresh` (admin required)
///
/// # Errors
///
/// Returns `500` with a correlation code if the reload fails.
pub async fn refresh_inventory_handler(
    State(st): State<AppState>,
    ctx: RequestContext,
) -> Result<Json<RefreshResponse>, AppError> {
    st.inventory.invalidate().await;
    st.inventory
        .ensure_loaded()
        .await
        .map_err(|e| AppError::internal(&ctx, "failed to reload inventory", e))?;

    let snapshot = st
        .inventory
        .snapshot()
        .await
        .ok_or_else(|| AppError::internal(&ctx, "inventory snapshot", "not loaded"))?;

    tracing::info!("{ctx} inventory refreshed: {} records", snapshot.records.len());

    Ok(Json(RefreshResponse {
        loaded_at: snapshot.loaded_at,
        count: snapshot.records.len(),
    }))
}
