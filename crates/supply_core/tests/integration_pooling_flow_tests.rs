mod support;

use std::collections::{HashMap, HashSet};

use supply_core::geo::haversine_km;
use supply_core::pooling::{pool_orders, PoolingConfig};

use support::{order, scattered_orders, shop_ids, TWO_KM_LAT};

#[test]
fn nearby_shops_share_a_wholesale_pool() {
    let orders = vec![
        order("S1", 12.90, 77.60, 30),
        order("S2", 12.91, 77.61, 25),
        order("S3", 13.5, 80.2, 10),
    ];
    let pools = pool_orders(&orders, &PoolingConfig::default());

    assert_eq!(shop_ids(&pools), vec![vec!["S1", "S2"], vec!["S3"]]);

    assert_eq!(pools[0].pool_id, "POOL-001");
    assert_eq!(pools[0].total_qty, 55);
    assert_eq!(pools[0].discount.label, "15% WHOLESALE");
    assert_eq!(pools[0].discount.rate, 0.15);
    assert!((pools[0].radius_km - 1.5).abs() < 0.1, "radius {}", pools[0].radius_km);
    assert_eq!(pools[0].center, orders[0].location);

    assert_eq!(pools[1].pool_id, "POOL-002");
    assert_eq!(pools[1].total_qty, 10);
    assert_eq!(pools[1].discount.label, "STANDARD");
    assert_eq!(pools[1].radius_km, 0.0);
}

#[test]
fn pool_of_exactly_fifty_is_standard_and_fifty_one_is_wholesale() {
    let config = PoolingConfig::default();
    let fifty = pool_orders(
        &[order("A", 17.70, 79.16, 25), order("B", 17.701, 79.16, 25)],
        &config,
    );
    let fifty_one = pool_orders(
        &[order("A", 17.70, 79.16, 25), order("B", 17.701, 79.16, 26)],
        &config,
    );
    assert_eq!(fifty[0].total_qty, 50);
    assert_eq!(fifty[0].discount.label, "STANDARD");
    assert_eq!(fifty_one[0].total_qty, 51);
    assert_eq!(fifty_one[0].discount.label, "15% WHOLESALE");
}

#[test]
fn far_apart_orders_stay_single() {
    let orders = vec![
        order("A", 17.0, 79.0, 5),
        order("B", 17.1, 79.0, 5),
        order("C", 17.2, 79.0, 5),
    ];
    let pools = pool_orders(&orders, &PoolingConfig::default());
    assert_eq!(pools.len(), 3);
    assert!(pools.iter().all(|pool| pool.radius_km == 0.0));
}

#[test]
fn chain_membership_depends_on_input_order() {
    // A-B and B-C are ~2 km apart, A-C ~4 km.
    let a = order("A", 17.70, 79.16, 1);
    let b = order("B", 17.70 + TWO_KM_LAT, 79.16, 1);
    let c = order("C", 17.70 + 2.0 * TWO_KM_LAT, 79.16, 1);
    let config = PoolingConfig::default();

    let anchored_on_a = pool_orders(&[a.clone(), b.clone(), c.clone()], &config);
    assert_eq!(shop_ids(&anchored_on_a), vec![vec!["A", "B"], vec!["C"]]);

    let anchored_on_b = pool_orders(&[b, a, c], &config);
    assert_eq!(shop_ids(&anchored_on_b), vec![vec!["B", "A", "C"]]);
}

#[test]
fn radius_stays_anchor_relative() {
    // B joins at ~2 km, C at ~2.9 km; B-C is ~4.9 km but that never counts.
    let a = order("A", 17.70, 79.16, 1);
    let b = order("B", 17.70 + TWO_KM_LAT, 79.16, 1);
    let c = order("C", 17.70 - 0.026, 79.16, 1);
    let pools = pool_orders(&[a.clone(), b.clone(), c.clone()], &PoolingConfig::default());
    assert_eq!(pools.len(), 1);
    let expected = haversine_km(a.location, b.location).max(haversine_km(a.location, c.location));
    assert_eq!(pools[0].radius_km, expected);
    assert!(haversine_km(b.location, c.location) > 3.0);
}

#[test]
fn pools_partition_scattered_orders() {
    let orders = scattered_orders(150, 11);
    let pools = pool_orders(&orders, &PoolingConfig::default());

    let mut seen = HashSet::new();
    for pool in &pools {
        for shop in &pool.shops {
            assert!(seen.insert(shop.as_str()), "{shop} appears twice");
        }
    }
    let expected: HashSet<&str> = orders.iter().map(|o| o.shop_id.as_str()).collect();
    assert_eq!(seen, expected);

    let total: u64 = pools.iter().map(|p| p.total_qty).sum();
    let input_total: u64 = orders.iter().map(|o| u64::from(o.qty_needed)).sum();
    assert_eq!(total, input_total);
}

#[test]
fn radius_is_max_anchor_distance_below_threshold() {
    let orders = scattered_orders(150, 23);
    let config = PoolingConfig::default();
    let pools = pool_orders(&orders, &config);
    let by_id: HashMap<&str, _> = orders.iter().map(|o| (o.shop_id.as_str(), o)).collect();

    for pool in pools.iter().filter(|p| p.len() > 1) {
        let anchor = by_id[pool.anchor()];
        let max = pool.shops[1..]
            .iter()
            .map(|id| haversine_km(anchor.location, by_id[id.as_str()].location))
            .fold(0.0_f64, f64::max);
        assert_eq!(pool.radius_km, max);
        assert!(pool.radius_km < config.clumping_radius_km);
    }
}

#[test]
fn no_unpooled_order_sits_inside_an_earlier_anchor_radius() {
    let orders = scattered_orders(120, 5);
    let config = PoolingConfig::default();
    let pools = pool_orders(&orders, &config);
    let by_id: HashMap<&str, _> = orders.iter().map(|o| (o.shop_id.as_str(), o)).collect();

    // Each later pool's members were unprocessed while every earlier anchor scanned.
    for (i, pool) in pools.iter().enumerate() {
        let anchor = by_id[pool.anchor()];
        for later in &pools[i + 1..] {
            for shop in &later.shops {
                let d = haversine_km(anchor.location, by_id[shop.as_str()].location);
                assert!(
                    d >= config.clumping_radius_km,
                    "{shop} should have joined {}",
                    pool.pool_id
                );
            }
        }
    }
}

#[test]
fn pooling_is_deterministic() {
    let orders = scattered_orders(80, 99);
    let config = PoolingConfig::default();
    assert_eq!(pool_orders(&orders, &config), pool_orders(&orders, &config));
}

#[test]
fn wider_radius_from_config_merges_more() {
    let orders = vec![order("A", 17.0, 79.0, 5), order("B", 17.036, 79.0, 5)];
    let narrow = pool_orders(&orders, &PoolingConfig::default());
    let wide = pool_orders(
        &orders,
        &PoolingConfig {
            clumping_radius_km: 5.0,
            ..PoolingConfig::default()
        },
    );
    assert_eq!(narrow.len(), 2);
    assert_eq!(wide.len(), 1);
}
