use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::health;
use crate::handlers::pool::pool_orders;
use crate::handlers::recommend::recommend_distributor;
use crate::handlers::simulate::simulate;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/pool_orders", post(pool_orders))
        .route("/recommend_distributor", post(recommend_distributor))
        .route("/simulate", get(simulate))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use supply_core::risk::RiskService;
    use supply_core::{DecisionEngine, EngineConfig};
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        create_router(AppState::new(DecisionEngine::new(
            EngineConfig::default(),
            RiskService::fallback_only(0.5),
        )))
    }

    async fn post_json(uri: &str, body: &str) -> (StatusCode, Value) {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("request"),
            )
            .await
            .expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        (status, serde_json::from_slice(&bytes).expect("json body"))
    }

    #[tokio::test]
    async fn pool_orders_round_trip() {
        let (status, body) = post_json(
            "/pool_orders",
            r#"[{"shop_id":"S1","lat":12.90,"lon":77.60,"qty_needed":30},
                {"shop_id":"S2","lat":12.91,"lon":77.61,"qty_needed":25}]"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["pool_id"], "POOL-001");
        assert_eq!(body[0]["total_qty"], 55);
        assert_eq!(body[0]["discount"], "15% WHOLESALE");
    }

    #[tokio::test]
    async fn missing_coordinate_returns_400() {
        let (status, body) = post_json(
            "/pool_orders",
            r#"[{"shop_id":"S1","lat":12.90,"qty_needed":30}]"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn malformed_json_returns_400() {
        let (status, body) = post_json("/recommend_distributor", r#"{"shop_id":"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "malformed_request");
    }

    #[tokio::test]
    async fn recommend_returns_status_and_options() {
        let (status, body) = post_json(
            "/recommend_distributor",
            r#"{"shop_id":"R100","lat":17.715,"lon":79.195,"current_stock":87}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["shop_status"], "STABLE");
        assert_eq!(body["risk_score"], 0.5);
        assert_eq!(body["top_pick"]["distributor"], "Budget Movers");
        assert_eq!(body["all_options"].as_array().map(Vec::len), Some(3));
    }
}
