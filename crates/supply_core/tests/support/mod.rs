#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use supply_core::orders::PendingOrder;

/// Roughly 0.018 degrees of latitude per 2 km.
pub const TWO_KM_LAT: f64 = 0.018;

pub fn order(shop_id: &str, lat: f64, lon: f64, qty: u32) -> PendingOrder {
    PendingOrder::new(shop_id, lat, lon, qty)
}

/// Seeded orders scattered over a ~20 km box around Jangaon.
pub fn scattered_orders(count: usize, seed: u64) -> Vec<PendingOrder> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            order(
                &format!("R{:03}", i + 1),
                17.60 + rng.gen_range(0.0..0.2),
                79.05 + rng.gen_range(0.0..0.2),
                rng.gen_range(0..40),
            )
        })
        .collect()
}

pub fn shop_ids(pools: &[supply_core::pooling::Pool]) -> Vec<Vec<&str>> {
    pools
        .iter()
        .map(|pool| pool.shops.iter().map(String::as_str).collect())
        .collect()
}
