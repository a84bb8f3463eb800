//! Response bodies. Field names follow the public JSON API.

use serde::{Deserialize, Serialize};
use supply_core::pooling::Pool;
use supply_core::ranking::{RankedRecommendations, Recommendation};
use supply_core::simulation::SimulationReport;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolView {
    pub pool_id: String,
    pub shops: Vec<String>,
    pub total_qty: u64,
    pub center_lat: f64,
    pub center_lon: f64,
    /// Rounded to two decimals.
    pub radius_km: f64,
    pub discount: String,
    pub discount_val: f64,
}

impl From<Pool> for PoolView {
    fn from(pool: Pool) -> Self {
        Self {
            pool_id: pool.pool_id,
            shops: pool.shops,
            total_qty: pool.total_qty,
            center_lat: pool.center.lat,
            center_lon: pool.center.lon,
            radius_km: (pool.radius_km * 100.0).round() / 100.0,
            discount: pool.discount.label,
            discount_val: pool.discount.rate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationView {
    pub shop_id: String,
    pub risk_score: f64,
    pub shop_status: String,
    pub top_pick: Option<Recommendation>,
    pub alternatives: Vec<Recommendation>,
    pub all_options: Vec<Recommendation>,
}

impl From<RankedRecommendations> for RecommendationView {
    fn from(ranked: RankedRecommendations) -> Self {
        Self {
            alternatives: ranked.alternatives().to_vec(),
            shop_id: ranked.shop_id,
            risk_score: ranked.risk_score.value(),
            shop_status: ranked.shop_status,
            top_pick: ranked.top_pick,
            all_options: ranked.all_options,
        }
    }
}

pub type SimulationView = SimulationReport;
