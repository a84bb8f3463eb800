//! Engine configuration, loadable from a JSON file.
//!
//! Every section is optional; omitted fields keep their documented defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::DistributorCatalog;
use crate::error::ConfigError;
use crate::pooling::PoolingConfig;
use crate::ranking::RankingConfig;
use crate::risk::{FeatureNormalization, RiskConfig};
use crate::simulation::SimulationConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub pooling: PoolingConfig,
    pub ranking: RankingConfig,
    pub distributors: DistributorCatalog,
    pub normalization: FeatureNormalization,
    pub risk: RiskConfig,
    pub simulation: SimulationConfig,
}

impl EngineConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.distributors.validate()?;
        self.normalization.validate()?;
        self.simulation.validate()?;
        if !(self.pooling.clumping_radius_km > 0.0) {
            return Err(ConfigError::Invalid(
                "pooling.clumping_radius_km must be positive".to_string(),
            ));
        }
        // Both sides of the heuristic's low-stock comparison are clamped ratios.
        if !(self.risk.heuristic_low_stock_units < self.normalization.max_stock) {
            return Err(ConfigError::Invalid(
                "risk.heuristic_low_stock_units must be below normalization.max_stock"
                    .to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.ranking.rule.critical_risk_threshold) {
            return Err(ConfigError::Invalid(
                "ranking.rule.critical_risk_threshold must be within [0, 1]".to_string(),
            ));
        }
        Ok(())
    }
}
