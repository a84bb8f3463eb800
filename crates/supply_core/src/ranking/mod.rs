//! Distributor ranking for a single shop request.
//!
//! The request is classified into a [Scenario] once, then every distributor
//! is scored with that scenario's weights:
//!
//! `score = (speed_scale_hrs / speed_hrs) * speed
//!        + (cost_scale / cost) * affordability
//!        + reliability * reliability_weight`
//!
//! multiplied by the scenario's festival boost when the shop is in a festival
//! period. Scores are rounded to one decimal and ranked with a stable sort,
//! so catalog order breaks ties.

pub mod scenario;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{Distributor, DistributorCatalog};
use crate::retailer::RetailerRequest;
use crate::risk::RiskScore;

pub use scenario::{Scenario, ScenarioRule, StatusModel};

/// Weights for one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioWeights {
    #[serde(default)]
    pub speed: f64,
    #[serde(default)]
    pub affordability: f64,
    #[serde(default)]
    pub reliability: f64,
    #[serde(default = "unit_boost")]
    pub festival_boost: f64,
    pub reason: String,
}

fn unit_boost() -> f64 {
    1.0
}

/// Scenario-keyed weight table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringTable {
    pub critical: ScenarioWeights,
    pub warning: ScenarioWeights,
    pub stable: ScenarioWeights,
}

impl Default for ScoringTable {
    fn default() -> Self {
        Self {
            critical: ScenarioWeights {
                speed: 50.0,
                affordability: 0.0,
                reliability: 100.0,
                festival_boost: 1.5,
                reason: "FASTEST (Urgent Need)".to_string(),
            },
            warning: ScenarioWeights {
                speed: 0.0,
                affordability: 50.0,
                reliability: 150.0,
                festival_boost: 1.0,
                reason: "LOW STOCK REBALANCE".to_string(),
            },
            stable: ScenarioWeights {
                speed: 0.0,
                affordability: 100.0,
                reliability: 20.0,
                festival_boost: 1.0,
                reason: "BEST PRICE (Routine)".to_string(),
            },
        }
    }
}

impl ScoringTable {
    pub fn get(&self, scenario: Scenario) -> &ScenarioWeights {
        match scenario {
            Scenario::Critical => &self.critical,
            Scenario::Warning => &self.warning,
            Scenario::Stable => &self.stable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub rule: ScenarioRule,
    pub weights: ScoringTable,
    /// Numerator of the speed term (hours).
    pub speed_scale_hrs: f64,
    /// Numerator of the affordability term (currency units).
    pub cost_scale: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            rule: ScenarioRule::default(),
            weights: ScoringTable::default(),
            speed_scale_hrs: 10.0,
            cost_scale: 100.0,
        }
    }
}

impl RankingConfig {
    pub fn score(
        &self,
        distributor: &Distributor,
        weights: &ScenarioWeights,
        festival: bool,
    ) -> f64 {
        let speed_term = self.speed_scale_hrs / distributor.speed_hrs;
        let cost_term = self.cost_scale / distributor.cost;
        let raw = speed_term * weights.speed
            + cost_term * weights.affordability
            + distributor.reliability * weights.reliability;
        if festival {
            raw * weights.festival_boost
        } else {
            raw
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub distributor: String,
    pub match_score: f64,
    pub reason: String,
    pub cost: f64,
    pub eta: String,
    pub tier: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRecommendations {
    pub shop_id: String,
    pub risk_score: RiskScore,
    pub scenario: Scenario,
    pub shop_status: String,
    pub top_pick: Option<Recommendation>,
    pub all_options: Vec<Recommendation>,
}

impl RankedRecommendations {
    /// Everything ranked below the top pick.
    pub fn alternatives(&self) -> &[Recommendation] {
        self.all_options.get(1..).unwrap_or(&[])
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Rank the catalog for `shop` given an already-clamped risk score.
pub fn recommend_distributor(
    shop: &RetailerRequest,
    risk: RiskScore,
    catalog: &DistributorCatalog,
    config: &RankingConfig,
) -> RankedRecommendations {
    let scenario = config
        .rule
        .classify(risk, shop.current_stock, shop.is_festival);
    let weights = config.weights.get(scenario);

    let mut options: Vec<Recommendation> = catalog
        .iter()
        .map(|distributor| Recommendation {
            distributor: distributor.name.clone(),
            match_score: round_one_decimal(config.score(distributor, weights, shop.is_festival)),
            reason: weights.reason.clone(),
            cost: distributor.cost,
            eta: distributor.eta_label(),
            tier: distributor.tier.clone(),
        })
        .collect();

    options.sort_by(|a, b| {
        b.match_score
            .partial_cmp(&a.match_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    debug!(
        shop_id = %shop.shop_id,
        risk = risk.value(),
        status = scenario.status_label(),
        top = options.first().map(|r| r.distributor.as_str()).unwrap_or("-"),
        "distributors ranked"
    );

    RankedRecommendations {
        shop_id: shop.shop_id.clone(),
        risk_score: risk,
        scenario,
        shop_status: scenario.status_label().to_string(),
        top_pick: options.first().cloned(),
        all_options: options,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rank(stock: u32, festival: bool, risk: f64) -> RankedRecommendations {
        let shop = RetailerRequest::new("R005", 17.66, 79.21, stock).with_festival(festival);
        recommend_distributor(
            &shop,
            RiskScore::clamped(risk),
            &DistributorCatalog::default(),
            &RankingConfig::default(),
        )
    }

    fn order(ranked: &RankedRecommendations) -> Vec<&str> {
        ranked
            .all_options
            .iter()
            .map(|r| r.distributor.as_str())
            .collect()
    }

    #[test]
    fn critical_prefers_speed_and_reliability() {
        let ranked = rank(100, false, 0.9);
        assert_eq!(ranked.shop_status, "CRITICAL");
        assert_eq!(
            order(&ranked),
            vec!["FastTrack Logistics", "GraminRoute Hub", "Budget Movers"]
        );
        assert_eq!(ranked.all_options[0].match_score, 223.0);
        assert_eq!(ranked.all_options[0].reason, "FASTEST (Urgent Need)");
    }

    #[test]
    fn warning_balances_reliability_and_cost() {
        let ranked = rank(10, false, 0.5);
        assert_eq!(ranked.shop_status, "WARNING");
        assert_eq!(
            order(&ranked),
            vec!["GraminRoute Hub", "Budget Movers", "FastTrack Logistics"]
        );
    }

    #[test]
    fn stable_prefers_the_cheapest() {
        let ranked = rank(100, false, 0.1);
        assert_eq!(ranked.shop_status, "STABLE");
        assert_eq!(
            order(&ranked),
            vec!["Budget Movers", "GraminRoute Hub", "FastTrack Logistics"]
        );
        assert_eq!(ranked.all_options[0].match_score, 183.7);
        assert_eq!(ranked.all_options[0].eta, "24 Hours");
    }

    #[test]
    fn festival_boost_scales_critical_scores() {
        let plain = rank(100, false, 0.9);
        let festive = rank(100, true, 0.9);
        assert_eq!(festive.all_options[0].match_score, 334.5);
        assert_eq!(order(&plain), order(&festive));
    }

    #[test]
    fn ties_keep_catalog_order() {
        let catalog = DistributorCatalog(vec![
            Distributor::new("First", 50.0, 10.0, 0.9, "A"),
            Distributor::new("Second", 50.0, 10.0, 0.9, "B"),
        ]);
        let shop = RetailerRequest::new("R001", 0.0, 0.0, 100);
        let ranked = recommend_distributor(
            &shop,
            RiskScore::clamped(0.1),
            &catalog,
            &RankingConfig::default(),
        );
        assert_eq!(ranked.top_pick.as_ref().expect("top pick").distributor, "First");
        assert_eq!(ranked.alternatives()[0].distributor, "Second");
    }

    #[test]
    fn empty_catalog_has_no_top_pick() {
        let shop = RetailerRequest::new("R001", 0.0, 0.0, 100);
        let ranked = recommend_distributor(
            &shop,
            RiskScore::clamped(0.1),
            &DistributorCatalog(Vec::new()),
            &RankingConfig::default(),
        );
        assert!(ranked.top_pick.is_none());
        assert!(ranked.alternatives().is_empty());
    }
}
