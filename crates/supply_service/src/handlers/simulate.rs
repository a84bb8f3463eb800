use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;
use crate::views::SimulationView;

pub const MAX_SIMULATION_DAYS: u32 = 3_650;

#[derive(Debug, Default, Deserialize)]
pub struct SimulateParams {
    pub seed: Option<u64>,
    pub days: Option<u32>,
}

/// `GET /simulate`: reactive vs predictive cash-flow comparison.
pub async fn simulate(
    State(state): State<AppState>,
    Query(params): Query<SimulateParams>,
) -> Result<Json<SimulationView>, ApiError> {
    if params.days.is_some_and(|days| days > MAX_SIMULATION_DAYS) {
        return Err(ApiError::BadRequest(format!(
            "days must be at most {MAX_SIMULATION_DAYS}"
        )));
    }
    Ok(Json(state.engine.simulate(params.seed, params.days)))
}
