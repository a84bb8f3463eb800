//! Greedy anchor-radius pooling of pending orders.
//!
//! Orders are visited in input order. The first unprocessed order anchors a
//! new pool, then every other unprocessed order (scanning the full list from
//! the start) that lies strictly inside the clumping radius of the anchor is
//! merged in. Distances are always anchor-relative, so the result depends on
//! input order. "Processed" is keyed by shop id: a second order carrying an
//! already-seen id is dropped.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geo::{haversine_km, Coordinate};
use crate::orders::PendingOrder;

/// Tunables for [pool_orders].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolingConfig {
    /// Orders strictly closer than this to the anchor join its pool (km).
    pub clumping_radius_km: f64,
    /// Pools whose total quantity exceeds this get the wholesale tier.
    pub wholesale_threshold_qty: u64,
    pub wholesale_label: String,
    pub wholesale_rate: f64,
    pub standard_label: String,
}

impl Default for PoolingConfig {
    fn default() -> Self {
        Self {
            clumping_radius_km: 3.0,
            wholesale_threshold_qty: 50,
            wholesale_label: "15% WHOLESALE".to_string(),
            wholesale_rate: 0.15,
            standard_label: "STANDARD".to_string(),
        }
    }
}

impl PoolingConfig {
    pub fn discount_for(&self, total_qty: u64) -> DiscountTier {
        if total_qty > self.wholesale_threshold_qty {
            DiscountTier {
                label: self.wholesale_label.clone(),
                rate: self.wholesale_rate,
            }
        } else {
            DiscountTier {
                label: self.standard_label.clone(),
                rate: 0.0,
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountTier {
    pub label: String,
    pub rate: f64,
}

impl DiscountTier {
    pub fn is_wholesale(&self) -> bool {
        self.rate > 0.0
    }
}

/// A group of orders delivered together. The first shop is the anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    pub pool_id: String,
    pub shops: Vec<String>,
    pub total_qty: u64,
    /// The anchor's position, not a centroid.
    pub center: Coordinate,
    /// Largest anchor-to-member distance (km); 0 for a single-member pool.
    pub radius_km: f64,
    pub discount: DiscountTier,
}

impl Pool {
    pub fn anchor(&self) -> &str {
        &self.shops[0]
    }

    pub fn len(&self) -> usize {
        self.shops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shops.is_empty()
    }
}

/// Format the sequential pool id (1-based, zero-padded to three digits).
pub fn pool_id(ordinal: usize) -> String {
    format!("POOL-{ordinal:03}")
}

struct PoolBuilder {
    shops: Vec<String>,
    total_qty: u64,
    center: Coordinate,
    radius_km: f64,
}

impl PoolBuilder {
    fn anchored(anchor: &PendingOrder) -> Self {
        Self {
            shops: vec![anchor.shop_id.clone()],
            total_qty: u64::from(anchor.qty_needed),
            center: anchor.location,
            radius_km: 0.0,
        }
    }

    fn absorb(&mut self, member: &PendingOrder, distance_km: f64) {
        self.shops.push(member.shop_id.clone());
        self.total_qty += u64::from(member.qty_needed);
        self.radius_km = self.radius_km.max(distance_km);
    }

    fn finish(self, ordinal: usize, config: &PoolingConfig) -> Pool {
        Pool {
            pool_id: pool_id(ordinal),
            discount: config.discount_for(self.total_qty),
            shops: self.shops,
            total_qty: self.total_qty,
            center: self.center,
            radius_km: self.radius_km,
        }
    }
}

/// Partition `orders` into delivery pools.
pub fn pool_orders(orders: &[PendingOrder], config: &PoolingConfig) -> Vec<Pool> {
    let mut processed: HashSet<&str> = HashSet::with_capacity(orders.len());
    let mut pools = Vec::new();

    for anchor in orders {
        if !processed.insert(anchor.shop_id.as_str()) {
            continue;
        }

        let mut builder = PoolBuilder::anchored(anchor);
        for neighbor in orders {
            if processed.contains(neighbor.shop_id.as_str()) {
                continue;
            }
            let distance_km = haversine_km(anchor.location, neighbor.location);
            if distance_km < config.clumping_radius_km {
                builder.absorb(neighbor, distance_km);
                processed.insert(neighbor.shop_id.as_str());
            }
        }

        let pool = builder.finish(pools.len() + 1, config);
        debug!(
            pool_id = %pool.pool_id,
            members = pool.shops.len(),
            total_qty = pool.total_qty,
            radius_km = pool.radius_km,
            "pool formed"
        );
        pools.push(pool);
    }

    pools
}
