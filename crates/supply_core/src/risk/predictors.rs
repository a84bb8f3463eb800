//! Concrete [RiskPredictor] implementations.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::features::{FeatureNormalization, RiskFeatures, FEATURE_COUNT};
use super::{PredictorError, RiskPredictor};

/// Always returns the same score.
#[derive(Debug, Clone, Copy)]
pub struct ConstantPredictor {
    pub score: f64,
}

impl ConstantPredictor {
    pub fn new(score: f64) -> Self {
        Self { score }
    }
}

impl RiskPredictor for ConstantPredictor {
    fn name(&self) -> &str {
        "constant"
    }

    fn predict(&self, _features: &RiskFeatures) -> Result<f64, PredictorError> {
        Ok(self.score)
    }
}

/// Rule-based signal: a base risk raised by festivals and low stock.
#[derive(Debug, Clone, Copy)]
pub struct HeuristicPredictor {
    pub base: f64,
    pub festival_weight: f64,
    pub low_stock_weight: f64,
    /// Stock feature values below this count as low stock.
    pub low_stock_ratio: f64,
}

impl HeuristicPredictor {
    pub fn from_normalization(norm: &FeatureNormalization, low_stock_units: f64) -> Self {
        Self {
            base: 0.2,
            festival_weight: 0.4,
            low_stock_weight: 0.3,
            low_stock_ratio: norm.stock_ratio(low_stock_units),
        }
    }
}

impl Default for HeuristicPredictor {
    fn default() -> Self {
        Self::from_normalization(&FeatureNormalization::default(), 15.0)
    }
}

impl RiskPredictor for HeuristicPredictor {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn predict(&self, features: &RiskFeatures) -> Result<f64, PredictorError> {
        let mut risk = self.base;
        if features.festival() {
            risk += self.festival_weight;
        }
        if features.stock() < self.low_stock_ratio {
            risk += self.low_stock_weight;
        }
        Ok(risk)
    }
}

/// Logistic regression over the seven features, loaded from a JSON file:
/// `{"weights": [w0, ..., w6], "bias": b}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticPredictor {
    pub weights: [f64; FEATURE_COUNT],
    #[serde(default)]
    pub bias: f64,
}

impl LogisticPredictor {
    pub fn new(weights: [f64; FEATURE_COUNT], bias: f64) -> Self {
        Self { weights, bias }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, PredictorError> {
        let model: Self = serde_json::from_str(raw)?;
        if model.weights.iter().any(|w| !w.is_finite()) || !model.bias.is_finite() {
            return Err(PredictorError::Inference(
                "model weights must be finite".to_string(),
            ));
        }
        Ok(model)
    }

    pub fn load(path: &Path) -> Result<Self, PredictorError> {
        let raw = std::fs::read_to_string(path).map_err(|source| PredictorError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }
}

impl RiskPredictor for LogisticPredictor {
    fn name(&self) -> &str {
        "logistic"
    }

    fn predict(&self, features: &RiskFeatures) -> Result<f64, PredictorError> {
        let logit = self
            .weights
            .iter()
            .zip(features.values())
            .fold(self.bias, |acc, (w, x)| acc + w * x);
        Ok(1.0 / (1.0 + (-logit).exp()))
    }
}
