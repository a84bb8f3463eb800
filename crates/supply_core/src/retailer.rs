//! A shop's restock request as consumed by the ranking engine.

use serde::{Deserialize, Serialize};

pub const DEFAULT_DAILY_SALES: f64 = 10.0;
pub const DEFAULT_LEAD_TIME_DAYS: f64 = 3.0;
pub const DEFAULT_PROFIT_MARGIN_PCT: f64 = 15.0;
pub const DEFAULT_SHELF_LIFE_DAYS: f64 = 30.0;
pub const DEFAULT_CREDIT_SCORE: f64 = 700.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetailerRequest {
    pub shop_id: String,
    pub lat: f64,
    pub lon: f64,
    pub current_stock: u32,
    #[serde(default)]
    pub is_festival: bool,
    #[serde(default = "default_daily_sales")]
    pub daily_sales: f64,
    #[serde(default = "default_lead_time_days")]
    pub lead_time_days: f64,
    #[serde(default = "default_profit_margin_pct")]
    pub profit_margin_pct: f64,
    #[serde(default = "default_shelf_life_days")]
    pub shelf_life_days: f64,
    #[serde(default = "default_credit_score")]
    pub credit_score: f64,
}

fn default_daily_sales() -> f64 {
    DEFAULT_DAILY_SALES
}

fn default_lead_time_days() -> f64 {
    DEFAULT_LEAD_TIME_DAYS
}

fn default_profit_margin_pct() -> f64 {
    DEFAULT_PROFIT_MARGIN_PCT
}

fn default_shelf_life_days() -> f64 {
    DEFAULT_SHELF_LIFE_DAYS
}

fn default_credit_score() -> f64 {
    DEFAULT_CREDIT_SCORE
}

impl RetailerRequest {
    /// Request with only the core fields set; extended fields take defaults.
    pub fn new(shop_id: impl Into<String>, lat: f64, lon: f64, current_stock: u32) -> Self {
        Self {
            shop_id: shop_id.into(),
            lat,
            lon,
            current_stock,
            is_festival: false,
            daily_sales: DEFAULT_DAILY_SALES,
            lead_time_days: DEFAULT_LEAD_TIME_DAYS,
            profit_margin_pct: DEFAULT_PROFIT_MARGIN_PCT,
            shelf_life_days: DEFAULT_SHELF_LIFE_DAYS,
            credit_score: DEFAULT_CREDIT_SCORE,
        }
    }

    pub fn with_festival(mut self, is_festival: bool) -> Self {
        self.is_festival = is_festival;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extended_fields_default_when_absent() {
        let request: RetailerRequest = serde_json::from_str(
            r#"{"shop_id":"R005","lat":17.66,"lon":79.21,"current_stock":10}"#,
        )
        .expect("request should parse");
        assert!(!request.is_festival);
        assert_eq!(request.daily_sales, DEFAULT_DAILY_SALES);
        assert_eq!(request.credit_score, DEFAULT_CREDIT_SCORE);
        assert_eq!(request, RetailerRequest::new("R005", 17.66, 79.21, 10));
    }

    #[test]
    fn negative_stock_does_not_parse() {
        let parsed = serde_json::from_str::<RetailerRequest>(
            r#"{"shop_id":"R005","lat":17.66,"lon":79.21,"current_stock":-1}"#,
        );
        assert!(parsed.is_err());
    }
}
