use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use supply_core::retailer::RetailerRequest;
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;
use crate::views::RecommendationView;

/// `POST /recommend_distributor`: rank distributors for one shop.
pub async fn recommend_distributor(
    State(state): State<AppState>,
    payload: Result<Json<RetailerRequest>, JsonRejection>,
) -> Result<Json<RecommendationView>, ApiError> {
    let Json(shop) = payload.map_err(|rejection| ApiError::Malformed(rejection.body_text()))?;
    if shop.shop_id.trim().is_empty() {
        return Err(ApiError::BadRequest("shop_id cannot be empty".to_string()));
    }
    let ranked = state.engine.recommend_distributor(&shop);
    info!(
        shop_id = %ranked.shop_id,
        status = %ranked.shop_status,
        risk = ranked.risk_score.value(),
        "distributor recommended"
    );
    Ok(Json(RecommendationView::from(ranked)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use supply_core::risk::{HeuristicPredictor, RiskService};
    use supply_core::{DecisionEngine, EngineConfig};

    use super::*;

    fn state() -> AppState {
        AppState::new(DecisionEngine::new(
            EngineConfig::default(),
            RiskService::new(Arc::new(HeuristicPredictor::default()), 0.5),
        ))
    }

    #[tokio::test]
    async fn urgent_shop_gets_the_fastest_distributor() {
        let shop = RetailerRequest::new("R005", 17.663602, 79.206898, 10).with_festival(true);
        let Json(view) = recommend_distributor(State(state()), Ok(Json(shop)))
            .await
            .expect("request should succeed");

        assert_eq!(view.shop_status, "CRITICAL");
        assert_eq!(
            view.top_pick.expect("top pick").distributor,
            "FastTrack Logistics"
        );
        assert_eq!(view.alternatives.len(), 2);
        assert_eq!(view.all_options.len(), 3);
    }

    #[tokio::test]
    async fn blank_shop_id_is_rejected() {
        let shop = RetailerRequest::new("  ", 17.66, 79.21, 10);
        let result = recommend_distributor(State(state()), Ok(Json(shop))).await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }
}
