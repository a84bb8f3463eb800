//! Risk score contract between the decision engines and external predictors.
//!
//! A predictor maps the seven normalised features to a stock-out risk. The
//! [RiskService] wraps whichever predictor is loaded and guarantees callers a
//! score in [0, 1]: failures and non-finite outputs become the configured
//! fallback, and everything else is clamped.

pub mod features;
pub mod predictors;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

pub use features::{FeatureNormalization, RiskFeatures, FEATURE_COUNT};
pub use predictors::{ConstantPredictor, HeuristicPredictor, LogisticPredictor};

/// Stock-out / delivery risk in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskScore(f64);

impl RiskScore {
    /// Clamp `raw` into [0, 1]. NaN maps to 0.
    pub fn clamped(raw: f64) -> Self {
        if raw.is_nan() {
            return Self(0.0);
        }
        Self(raw.clamp(0.0, 1.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

#[derive(Debug, Error)]
pub enum PredictorError {
    #[error("failed to read model file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed model weights: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("inference failed: {0}")]
    Inference(String),
}

/// An interchangeable risk model. Implementations must be reentrant.
pub trait RiskPredictor: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &str;

    /// Raw model output; may be outside [0, 1].
    fn predict(&self, features: &RiskFeatures) -> Result<f64, PredictorError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Score returned when no predictor is loaded or inference fails.
    pub fallback_score: f64,
    /// Stock below this many units counts as low for the heuristic predictor.
    pub heuristic_low_stock_units: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            fallback_score: 0.5,
            heuristic_low_stock_units: 15.0,
        }
    }
}

/// Long-lived, shareable front for the loaded predictor.
#[derive(Debug, Clone)]
pub struct RiskService {
    primary: Option<Arc<dyn RiskPredictor>>,
    fallback: RiskScore,
}

impl RiskService {
    pub fn new(primary: Arc<dyn RiskPredictor>, fallback_score: f64) -> Self {
        Self {
            primary: Some(primary),
            fallback: RiskScore::clamped(fallback_score),
        }
    }

    /// Logic-only mode: every prediction is the fallback.
    pub fn fallback_only(fallback_score: f64) -> Self {
        Self {
            primary: None,
            fallback: RiskScore::clamped(fallback_score),
        }
    }

    pub fn from_optional(primary: Option<Arc<dyn RiskPredictor>>, fallback_score: f64) -> Self {
        Self {
            primary,
            fallback: RiskScore::clamped(fallback_score),
        }
    }

    pub fn fallback(&self) -> RiskScore {
        self.fallback
    }

    pub fn predictor_name(&self) -> Option<&str> {
        self.primary.as_deref().map(|predictor| predictor.name())
    }

    pub fn predict(&self, features: &RiskFeatures) -> RiskScore {
        let Some(predictor) = self.primary.as_deref() else {
            return self.fallback;
        };
        match predictor.predict(features) {
            Ok(raw) if raw.is_finite() => RiskScore::clamped(raw),
            Ok(raw) => {
                warn!(predictor = predictor.name(), raw, "non-finite risk output, using fallback");
                self.fallback
            }
            Err(error) => {
                warn!(
                    predictor = predictor.name(),
                    %error,
                    "risk prediction failed, using fallback"
                );
                self.fallback
            }
        }
    }
}
