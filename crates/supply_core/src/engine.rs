//! Request-level entry points shared by every transport.

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::error::ValidationError;
use crate::orders::{normalize_orders, PendingOrderPayload};
use crate::pooling::{pool_orders, Pool};
use crate::ranking::{recommend_distributor, RankedRecommendations};
use crate::retailer::RetailerRequest;
use crate::risk::{RiskFeatures, RiskScore, RiskService};
use crate::simulation::{run_simulation, SimulationConfig, SimulationReport};

/// Read-only configuration plus the shared risk predictor. Cheap to clone.
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    config: Arc<EngineConfig>,
    risk: Arc<RiskService>,
}

impl DecisionEngine {
    pub fn new(config: EngineConfig, risk: RiskService) -> Self {
        Self {
            config: Arc::new(config),
            risk: Arc::new(risk),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn risk_service(&self) -> &RiskService {
        &self.risk
    }

    pub fn pool_orders(
        &self,
        payloads: &[PendingOrderPayload],
    ) -> Result<Vec<Pool>, ValidationError> {
        let orders = normalize_orders(payloads)?;
        Ok(pool_orders(&orders, &self.config.pooling))
    }

    pub fn predict_risk(&self, shop: &RetailerRequest) -> RiskScore {
        let features = RiskFeatures::from_request(shop, &self.config.normalization);
        self.risk.predict(&features)
    }

    pub fn recommend_distributor(&self, shop: &RetailerRequest) -> RankedRecommendations {
        let risk = self.predict_risk(shop);
        recommend_distributor(shop, risk, &self.config.distributors, &self.config.ranking)
    }

    /// Run the configured simulation, optionally with another seed or horizon.
    pub fn simulate(&self, seed: Option<u64>, days: Option<u32>) -> SimulationReport {
        let mut config: SimulationConfig = self.config.simulation.clone();
        if let Some(seed) = seed {
            config.seed = seed;
        }
        if let Some(days) = days {
            config.days = days;
        }
        run_simulation(&config, &self.risk, &self.config.normalization)
    }
}
