pub mod pool;
pub mod recommend;
pub mod simulate;

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let risk = state.engine.risk_service();
    Json(json!({
        "status": "ok",
        "predictor": risk.predictor_name().unwrap_or("fallback"),
        "fallback_score": risk.fallback().value(),
    }))
}
