//! Scenario selection: one classification per request, applied to every
//! distributor in that request.

use serde::{Deserialize, Serialize};

use crate::risk::RiskScore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Scenario {
    Critical,
    Warning,
    Stable,
}

impl Scenario {
    pub fn status_label(self) -> &'static str {
        match self {
            Scenario::Critical => "CRITICAL",
            Scenario::Warning => "WARNING",
            Scenario::Stable => "STABLE",
        }
    }
}

/// Whether the low-stock WARNING state is reported separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusModel {
    /// CRITICAL / STABLE only.
    TwoState,
    /// CRITICAL / WARNING / STABLE.
    ThreeState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioRule {
    /// Risk strictly above this is critical.
    pub critical_risk_threshold: f64,
    /// Stock strictly below this is a warning (three-state model only).
    pub low_stock_threshold: u32,
    pub status_model: StatusModel,
}

impl Default for ScenarioRule {
    fn default() -> Self {
        Self {
            critical_risk_threshold: 0.7,
            low_stock_threshold: 20,
            status_model: StatusModel::ThreeState,
        }
    }
}

impl ScenarioRule {
    pub fn classify(&self, risk: RiskScore, current_stock: u32, is_festival: bool) -> Scenario {
        if risk.value() > self.critical_risk_threshold || is_festival {
            return Scenario::Critical;
        }
        match self.status_model {
            StatusModel::ThreeState if current_stock < self.low_stock_threshold => {
                Scenario::Warning
            }
            _ => Scenario::Stable,
        }
    }
}
