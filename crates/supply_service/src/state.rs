use std::path::Path;
use std::sync::Arc;

use clap::ValueEnum;
use supply_core::risk::{
    ConstantPredictor, HeuristicPredictor, LogisticPredictor, RiskPredictor, RiskService,
};
use supply_core::{DecisionEngine, EngineConfig};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct AppState {
    pub engine: DecisionEngine,
}

impl AppState {
    pub fn new(engine: DecisionEngine) -> Self {
        Self { engine }
    }
}

/// Which risk predictor backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PredictorKind {
    /// Rule-based signal from festival flag and stock level.
    Heuristic,
    /// Logistic model loaded from `--risk-model`.
    Logistic,
    /// Always the configured fallback score.
    Constant,
}

/// Build the shared risk service. A logistic model that fails to load
/// leaves the service in logic-only mode (fallback score for every call).
pub fn build_risk_service(
    kind: PredictorKind,
    model_path: Option<&Path>,
    config: &EngineConfig,
) -> RiskService {
    let fallback = config.risk.fallback_score;
    let primary: Option<Arc<dyn RiskPredictor>> = match kind {
        PredictorKind::Heuristic => Some(Arc::new(HeuristicPredictor::from_normalization(
            &config.normalization,
            config.risk.heuristic_low_stock_units,
        ))),
        PredictorKind::Constant => Some(Arc::new(ConstantPredictor::new(fallback))),
        PredictorKind::Logistic => match model_path {
            Some(path) => match LogisticPredictor::load(path) {
                Ok(model) => {
                    info!(path = %path.display(), "risk model loaded");
                    Some(Arc::new(model))
                }
                Err(error) => {
                    warn!(%error, "running in logic-only mode");
                    None
                }
            },
            None => {
                warn!("no --risk-model given, running in logic-only mode");
                None
            }
        },
    };
    RiskService::from_optional(primary, fallback)
}
