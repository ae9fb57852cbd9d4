//! Determinism and totality properties: rebuilding from the same inputs
//! always yields the same roots, and every deposit seen by the loader ends
//! up accounted for exactly once, either as a refund or as unfilled.

use std::collections::HashMap;

use alloy_primitives::{Address, U256};
use dataworker_core::{build_pool_rebalance_root, build_relayer_refund_root, build_slow_relay_root, load_bundle_data};
use dataworker_testing::{fixtures, MockConfigStoreClient, MockHubPoolClient, MockSpokePoolClient};
use dataworker_types::{BlockRange, ChainId, DataworkerConfig};
use proptest::prelude::*;

const CHAIN_A: u64 = 1;
const CHAIN_B: u64 = 10;

fn l1_token() -> Address {
    Address::repeat_byte(0xE1)
}

fn token_b() -> Address {
    Address::repeat_byte(0xA1)
}

fn harness(
    deposit_amounts: &[u64],
    fill_fractions: &[u8]
) -> (DataworkerConfig, MockHubPoolClient, MockConfigStoreClient, HashMap<ChainId, MockSpokePoolClient>, Vec<BlockRange>) {
    let config = DataworkerConfig::new(vec![ChainId::new(CHAIN_A), ChainId::new(CHAIN_B)]);
    let hub_pool = MockHubPoolClient::updated().with_token_mapping(ChainId::new(CHAIN_B), l1_token(), token_b());
    let config_store = MockConfigStoreClient::default();

    let relayer = Address::repeat_byte(0xF1);
    let mut chain_a = MockSpokePoolClient::new(ChainId::new(CHAIN_A));
    let mut chain_b = MockSpokePoolClient::new(ChainId::new(CHAIN_B));

    for (i, (&amount, &fraction)) in deposit_amounts.iter().zip(fill_fractions).enumerate() {
        let deposit = fixtures::deposit(CHAIN_A, CHAIN_B, i as u32, amount.max(1), 150);
        chain_a = chain_a.with_deposit(deposit.clone());

        // `fraction` picks a fill amount in [1, amount]; 0 means "no fill at
        // all", leaving the deposit entirely unfilled.
        if fraction > 0 {
            let fill_amount = U256::from(1 + (u64::from(fraction) % amount.max(1)));
            let fill = fixtures::partial_fill(&deposit, relayer, CHAIN_B, fill_amount, 550);
            chain_b = chain_b.with_fill(fill);
        }
    }

    let mut clients = HashMap::new();
    clients.insert(ChainId::new(CHAIN_A), chain_a);
    clients.insert(ChainId::new(CHAIN_B), chain_b);
    let ranges = vec![BlockRange::new(100, 200), BlockRange::new(500, 600)];

    (config, hub_pool, config_store, clients, ranges)
}

proptest! {
    /// Rebuilding all three roots twice from the same loaded data always
    /// yields identical hex roots.
    #[test]
    fn roots_are_deterministic(
        amounts in prop::collection::vec(1u64..10_000, 1..6),
        fractions in prop::collection::vec(0u8..255, 1..6)
    ) {
        let fractions: Vec<u8> = amounts.iter().zip(fractions.iter().cycle()).map(|(_, f)| *f).collect();
        let (config, hub_pool, config_store, clients, ranges) = harness(&amounts, &fractions);

        let rt = tokio::runtime::Runtime::new().unwrap();
        let (pool_roots, refund_roots, slow_roots) = rt.block_on(async {
            let loaded_a = load_bundle_data(&config, &hub_pool, &config_store, &clients, &ranges, 1_000).await.unwrap();
            let loaded_b = load_bundle_data(&config, &hub_pool, &config_store, &clients, &ranges, 1_000).await.unwrap();

            let pool_a = build_pool_rebalance_root(&config, &hub_pool, &config_store, &loaded_a.fills_to_refund, &loaded_a.deposits, &loaded_a.slow_fill_excess, 1_000).await.unwrap();
            let pool_b = build_pool_rebalance_root(&config, &hub_pool, &config_store, &loaded_b.fills_to_refund, &loaded_b.deposits, &loaded_b.slow_fill_excess, 1_000).await.unwrap();

            let refund_a = build_relayer_refund_root(&config, &hub_pool, &config_store, &loaded_a.fills_to_refund, &pool_a.leaves, 1_000).await.unwrap();
            let refund_b = build_relayer_refund_root(&config, &hub_pool, &config_store, &loaded_b.fills_to_refund, &pool_b.leaves, 1_000).await.unwrap();

            let slow_a = build_slow_relay_root(&loaded_a.unfilled_deposits);
            let slow_b = build_slow_relay_root(&loaded_b.unfilled_deposits);

            (
                (pool_a.tree.get_hex_root(), pool_b.tree.get_hex_root()),
                (refund_a.tree.get_hex_root(), refund_b.tree.get_hex_root()),
                (slow_a.tree.get_hex_root(), slow_b.tree.get_hex_root())
            )
        });

        prop_assert_eq!(pool_roots.0, pool_roots.1);
        prop_assert_eq!(refund_roots.0, refund_roots.1);
        prop_assert_eq!(slow_roots.0, slow_roots.1);
    }

    /// Every deposit the loader sees ends up either fully refunded (total
    /// filled amount credited across relayer-refund buckets) or carried as
    /// an unfilled deposit for the remainder — never both silently, never
    /// neither.
    #[test]
    fn every_deposit_is_refunded_or_unfilled(
        amounts in prop::collection::vec(1u64..10_000, 1..6),
        fractions in prop::collection::vec(0u8..255, 1..6)
    ) {
        let fractions: Vec<u8> = amounts.iter().zip(fractions.iter().cycle()).map(|(_, f)| *f).collect();
        let (config, hub_pool, config_store, clients, ranges) = harness(&amounts, &fractions);

        let rt = tokio::runtime::Runtime::new().unwrap();
        let loaded = rt.block_on(load_bundle_data(&config, &hub_pool, &config_store, &clients, &ranges, 1_000)).unwrap();

        let total_refunded: U256 = loaded
            .fills_to_refund
            .groups()
            .map(|(_, _, bucket)| bucket.total_refund_amount)
            .fold(U256::ZERO, |acc, v| acc + v);

        let total_unfilled: U256 =
            loaded.unfilled_deposits.iter().map(|u| u.unfilled_amount).fold(U256::ZERO, |acc, v| acc + v);

        let total_deposited: U256 = amounts.iter().map(|&a| U256::from(a.max(1))).fold(U256::ZERO, |acc, v| acc + v);

        // Every unit deposited is accounted for as either refunded or still
        // unfilled, and never double-counted across both.
        prop_assert_eq!(total_refunded + total_unfilled, total_deposited);
    }
}
