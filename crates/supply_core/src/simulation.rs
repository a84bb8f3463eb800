//! Multi-day cash-flow comparison of two restocking policies.
//!
//! Both policies see the same random demand. The reactive policy reorders a
//! fixed quantity at full price whenever stock runs low. The predictive
//! policy consults the [RiskService] each day, keeps a higher target on
//! surge days and buys through a pooled order when neighbours join (or the
//! order is large enough), which earns the bulk unit price and a shared
//! delivery fee. Stock is sold FIFO and spoils after a fixed shelf life.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::retailer::RetailerRequest;
use crate::risk::{FeatureNormalization, RiskFeatures, RiskService};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub days: u32,
    pub seed: u64,
    pub initial_cash: f64,
    pub initial_stock: u32,
    pub shelf_life_days: u32,
    pub base_unit_cost: f64,
    pub pooled_unit_cost: f64,
    pub margin_per_unit: f64,
    pub delivery_fee: f64,
    /// Pooled orders split the delivery fee this many ways.
    pub pooled_delivery_split: f64,
    pub demand_min: u32,
    pub demand_max_exclusive: u32,
    pub festival_demand_boost: u32,
    /// First festival day (0-based, inclusive).
    pub festival_start_day: u32,
    /// End of the festival window (0-based, exclusive).
    pub festival_end_day: u32,
    pub reactive_reorder_point: u32,
    pub reactive_order_qty: u32,
    pub routine_target_stock: u32,
    pub surge_target_stock: u32,
    /// Cap on non-surge predictive orders.
    pub routine_order_cap: u32,
    pub pool_participation_probability: f64,
    /// Orders at least this large always qualify for pooled pricing.
    pub bulk_order_qty: u32,
    /// Risk strictly above this marks a surge day.
    pub surge_risk_threshold: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            days: 60,
            seed: 42,
            initial_cash: 50_000.0,
            initial_stock: 50,
            shelf_life_days: 10,
            base_unit_cost: 80.0,
            pooled_unit_cost: 75.0,
            margin_per_unit: 20.0,
            delivery_fee: 100.0,
            pooled_delivery_split: 4.0,
            demand_min: 2,
            demand_max_exclusive: 8,
            festival_demand_boost: 10,
            festival_start_day: 21,
            festival_end_day: 25,
            reactive_reorder_point: 20,
            reactive_order_qty: 40,
            routine_target_stock: 15,
            surge_target_stock: 50,
            routine_order_cap: 10,
            pool_participation_probability: 0.7,
            bulk_order_qty: 50,
            surge_risk_threshold: 0.7,
        }
    }
}

impl SimulationConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_days(mut self, days: u32) -> Self {
        self.days = days;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.demand_max_exclusive <= self.demand_min {
            return Err(ConfigError::Invalid(
                "simulation.demand_max_exclusive must exceed demand_min".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.pool_participation_probability) {
            return Err(ConfigError::Invalid(
                "simulation.pool_participation_probability must be within [0, 1]".to_string(),
            ));
        }
        if !(self.pooled_delivery_split > 0.0) {
            return Err(ConfigError::Invalid(
                "simulation.pooled_delivery_split must be positive".to_string(),
            ));
        }
        if self.shelf_life_days == 0 {
            return Err(ConfigError::Invalid(
                "simulation.shelf_life_days must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn is_festival_day(&self, day: u32) -> bool {
        (self.festival_start_day..self.festival_end_day).contains(&day)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Batch {
    qty: u32,
    life: u32,
}

/// Stock and cash held under one policy.
#[derive(Debug, Clone)]
struct Ledger {
    cash: f64,
    batches: Vec<Batch>,
}

impl Ledger {
    fn new(cash: f64, stock: u32, shelf_life: u32) -> Self {
        Self {
            cash,
            batches: vec![Batch {
                qty: stock,
                life: shelf_life,
            }],
        }
    }

    fn stock(&self) -> u32 {
        self.batches.iter().map(|b| b.qty).sum()
    }

    fn receive(&mut self, purchase: Purchase, shelf_life: u32) {
        self.cash -= purchase.total_cost();
        self.batches.push(Batch {
            qty: purchase.qty,
            life: shelf_life,
        });
    }

    /// Sell oldest stock first, then age every batch and drop spoiled or empty ones.
    fn sell(&mut self, demand: u32) -> u32 {
        let mut remaining = demand;
        let mut sold = 0;
        for batch in self.batches.iter_mut() {
            if remaining == 0 {
                break;
            }
            let take = batch.qty.min(remaining);
            batch.qty -= take;
            remaining -= take;
            sold += take;
        }
        for batch in self.batches.iter_mut() {
            batch.life = batch.life.saturating_sub(1);
        }
        self.batches.retain(|b| b.life > 0 && b.qty > 0);
        sold
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Purchase {
    pub qty: u32,
    pub unit_cost: f64,
    pub delivery_fee: f64,
}

impl Purchase {
    pub fn total_cost(&self) -> f64 {
        f64::from(self.qty) * self.unit_cost + self.delivery_fee
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DayContext {
    pub day: u32,
    pub is_festival: bool,
    pub surge: bool,
}

/// Decides whether to restock before the day's sales.
pub trait RestockPolicy {
    fn name(&self) -> &'static str;

    fn order(&self, stock: u32, ctx: &DayContext, rng: &mut StdRng) -> Option<Purchase>;
}

#[derive(Debug, Clone)]
pub struct ReactivePolicy {
    pub reorder_point: u32,
    pub order_qty: u32,
    pub unit_cost: f64,
    pub delivery_fee: f64,
}

impl ReactivePolicy {
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            reorder_point: config.reactive_reorder_point,
            order_qty: config.reactive_order_qty,
            unit_cost: config.base_unit_cost,
            delivery_fee: config.delivery_fee,
        }
    }
}

impl RestockPolicy for ReactivePolicy {
    fn name(&self) -> &'static str {
        "reactive"
    }

    fn order(&self, stock: u32, _ctx: &DayContext, _rng: &mut StdRng) -> Option<Purchase> {
        (stock < self.reorder_point).then_some(Purchase {
            qty: self.order_qty,
            unit_cost: self.unit_cost,
            delivery_fee: self.delivery_fee,
        })
    }
}

#[derive(Debug, Clone)]
pub struct PredictivePolicy {
    pub routine_target: u32,
    pub surge_target: u32,
    pub routine_cap: u32,
    pub participation_probability: f64,
    pub bulk_qty: u32,
    pub unit_cost: f64,
    pub pooled_unit_cost: f64,
    pub delivery_fee: f64,
    pub pooled_delivery_split: f64,
}

impl PredictivePolicy {
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            routine_target: config.routine_target_stock,
            surge_target: config.surge_target_stock,
            routine_cap: config.routine_order_cap,
            participation_probability: config.pool_participation_probability,
            bulk_qty: config.bulk_order_qty,
            unit_cost: config.base_unit_cost,
            pooled_unit_cost: config.pooled_unit_cost,
            delivery_fee: config.delivery_fee,
            pooled_delivery_split: config.pooled_delivery_split,
        }
    }
}

impl RestockPolicy for PredictivePolicy {
    fn name(&self) -> &'static str {
        "predictive"
    }

    fn order(&self, stock: u32, ctx: &DayContext, rng: &mut StdRng) -> Option<Purchase> {
        let target = if ctx.surge {
            self.surge_target
        } else {
            self.routine_target
        };
        if stock >= target {
            return None;
        }
        let mut needed = target - stock;
        if !ctx.surge {
            needed = needed.min(self.routine_cap);
        }

        // Drawn for every order, even bulk ones that pool regardless.
        let neighbours_join = rng.gen_bool(self.participation_probability);
        let pooled = neighbours_join || needed >= self.bulk_qty;

        Some(if pooled {
            Purchase {
                qty: needed,
                unit_cost: self.pooled_unit_cost,
                delivery_fee: self.delivery_fee / self.pooled_delivery_split,
            }
        } else {
            Purchase {
                qty: needed,
                unit_cost: self.unit_cost,
                delivery_fee: self.delivery_fee,
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPoint {
    /// 1-based day label.
    pub day: u32,
    pub demand: u32,
    pub risk: f64,
    pub surge: bool,
    /// Net worth (cash + stock at base cost) under the reactive policy.
    pub traditional: i64,
    /// Net worth under the predictive policy.
    pub predictive: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub seed: u64,
    pub points: Vec<DayPoint>,
    pub final_traditional: i64,
    pub final_predictive: i64,
    pub uplift: i64,
    pub uplift_pct: f64,
}

fn net_worth(ledger: &Ledger, unit_value: f64) -> i64 {
    (ledger.cash + f64::from(ledger.stock()) * unit_value).round() as i64
}

/// Run both policies over `config.days` days with a seeded RNG.
pub fn run_simulation(
    config: &SimulationConfig,
    risk: &RiskService,
    normalization: &FeatureNormalization,
) -> SimulationReport {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let reactive = ReactivePolicy::from_config(config);
    let predictive = PredictivePolicy::from_config(config);
    let mut traditional =
        Ledger::new(config.initial_cash, config.initial_stock, config.shelf_life_days);
    let mut pooled = traditional.clone();
    let opening = net_worth(&traditional, config.base_unit_cost);
    let sale_price = config.base_unit_cost + config.margin_per_unit;
    let mut last_demand = config.demand_min;
    let mut points = Vec::with_capacity(config.days as usize);

    for day in 0..config.days {
        let is_festival = config.is_festival_day(day);
        let mut demand = rng.gen_range(config.demand_min..config.demand_max_exclusive);
        if is_festival {
            demand += config.festival_demand_boost;
        }

        let signal = shop_signal(config, pooled.stock(), last_demand, is_festival);
        let risk_score = risk.predict(&RiskFeatures::from_request(&signal, normalization));
        let ctx = DayContext {
            day,
            is_festival,
            surge: is_festival || risk_score.value() > config.surge_risk_threshold,
        };

        if let Some(purchase) = reactive.order(traditional.stock(), &ctx, &mut rng) {
            traditional.receive(purchase, config.shelf_life_days);
        }
        if let Some(purchase) = predictive.order(pooled.stock(), &ctx, &mut rng) {
            debug!(day, qty = purchase.qty, unit_cost = purchase.unit_cost, "predictive restock");
            pooled.receive(purchase, config.shelf_life_days);
        }

        let sold = traditional.sell(demand);
        traditional.cash += f64::from(sold) * sale_price;
        let sold = pooled.sell(demand);
        pooled.cash += f64::from(sold) * sale_price;
        last_demand = demand;

        points.push(DayPoint {
            day: day + 1,
            demand,
            risk: risk_score.value(),
            surge: ctx.surge,
            traditional: net_worth(&traditional, config.base_unit_cost),
            predictive: net_worth(&pooled, config.base_unit_cost),
        });
    }

    let final_traditional = points.last().map_or(opening, |p| p.traditional);
    let final_predictive = points.last().map_or(opening, |p| p.predictive);
    let uplift = final_predictive - final_traditional;
    let uplift_pct = if final_traditional != 0 {
        uplift as f64 / final_traditional as f64 * 100.0
    } else {
        0.0
    };

    SimulationReport {
        seed: config.seed,
        points,
        final_traditional,
        final_predictive,
        uplift,
        uplift_pct,
    }
}

/// Describe the simulated shop the way a live request would.
fn shop_signal(
    config: &SimulationConfig,
    stock: u32,
    last_demand: u32,
    is_festival: bool,
) -> RetailerRequest {
    let mut request = RetailerRequest::new("SIM-SHOP", 0.0, 0.0, stock).with_festival(is_festival);
    request.daily_sales = f64::from(last_demand);
    request.shelf_life_days = f64::from(config.shelf_life_days);
    request.profit_margin_pct = config.margin_per_unit / config.base_unit_cost * 100.0;
    request
}
