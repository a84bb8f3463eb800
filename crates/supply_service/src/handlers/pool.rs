use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use supply_core::orders::PendingOrderPayload;
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;
use crate::views::PoolView;

/// `POST /pool_orders`: group pending orders into delivery pools.
pub async fn pool_orders(
    State(state): State<AppState>,
    payload: Result<Json<Vec<PendingOrderPayload>>, JsonRejection>,
) -> Result<Json<Vec<PoolView>>, ApiError> {
    let Json(orders) = payload.map_err(|rejection| ApiError::Malformed(rejection.body_text()))?;
    let pools = state.engine.pool_orders(&orders)?;
    info!(orders = orders.len(), pools = pools.len(), "orders pooled");
    Ok(Json(pools.into_iter().map(PoolView::from).collect()))
}
