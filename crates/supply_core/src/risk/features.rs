//! The seven normalised business features fed to risk predictors.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::retailer::RetailerRequest;

pub const FEATURE_COUNT: usize = 7;

/// Denominators used to scale raw request fields into [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureNormalization {
    pub max_stock: f64,
    pub max_daily_sales: f64,
    pub max_lead_time_days: f64,
    pub max_margin_pct: f64,
    pub max_shelf_life_days: f64,
    pub max_credit_score: f64,
}

impl Default for FeatureNormalization {
    fn default() -> Self {
        Self {
            max_stock: 200.0,
            max_daily_sales: 50.0,
            max_lead_time_days: 14.0,
            max_margin_pct: 100.0,
            max_shelf_life_days: 365.0,
            max_credit_score: 900.0,
        }
    }
}

impl FeatureNormalization {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let denominators = [
            ("max_stock", self.max_stock),
            ("max_daily_sales", self.max_daily_sales),
            ("max_lead_time_days", self.max_lead_time_days),
            ("max_margin_pct", self.max_margin_pct),
            ("max_shelf_life_days", self.max_shelf_life_days),
            ("max_credit_score", self.max_credit_score),
        ];
        for (name, value) in denominators {
            if !(value > 0.0) || !value.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "normalization.{name} must be a positive number"
                )));
            }
        }
        Ok(())
    }

    pub fn stock_ratio(&self, stock: f64) -> f64 {
        ratio(stock, self.max_stock)
    }
}

fn ratio(value: f64, max: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    (value / max).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskFeatures(pub [f64; FEATURE_COUNT]);

impl RiskFeatures {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn from_request(request: &RetailerRequest, norm: &FeatureNormalization) -> Self {
        Self([
            norm.stock_ratio(f64::from(request.current_stock)),
            ratio(request.daily_sales, norm.max_daily_sales),
            ratio(request.lead_time_days, norm.max_lead_time_days),
            ratio(request.profit_margin_pct, norm.max_margin_pct),
            ratio(request.shelf_life_days, norm.max_shelf_life_days),
            if request.is_festival { 1.0 } else { 0.0 },
            ratio(request.credit_score, norm.max_credit_score),
        ])
    }

    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    pub fn stock(&self) -> f64 {
        self.0[0]
    }

    pub fn festival(&self) -> bool {
        self.0[5] >= 0.5
    }
}
