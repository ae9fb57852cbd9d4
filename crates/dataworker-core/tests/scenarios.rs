//! End-to-end scenarios covering a simple full fill, a partial fill that
//! yields a slow relay, an invalid fill, and the validate cycle's accept,
//! dispute, and defer paths.

use std::collections::HashMap;

use alloy_primitives::{Address, B256, U256};
use dataworker_core::{
    build_pool_rebalance_root, build_relayer_refund_root, build_slow_relay_root, load_bundle_data, run_validate_cycle, ValidationOutcome
};
use dataworker_metrics::DataworkerMetrics;
use dataworker_testing::{fixtures, MockChainProvider, MockConfigStoreClient, MockHubPoolClient, MockSpokePoolClient, MockTransactionSink};
use dataworker_types::{BlockRange, ChainId, DataworkerConfig, RootBundle};

const CHAIN_A: u64 = 1;
const CHAIN_B: u64 = 10;

fn l1_token() -> Address {
    Address::repeat_byte(0xE1)
}

fn token_b() -> Address {
    Address::repeat_byte(0xA1)
}

fn base_config() -> DataworkerConfig {
    DataworkerConfig::new(vec![ChainId::new(CHAIN_A), ChainId::new(CHAIN_B)])
}

fn spoke_pool_a() -> Address {
    Address::repeat_byte(0xBA)
}

fn spoke_pool_b() -> Address {
    Address::repeat_byte(0xBB)
}

fn base_hub_pool() -> MockHubPoolClient {
    MockHubPoolClient::updated()
        .with_token_mapping(ChainId::new(CHAIN_B), l1_token(), token_b())
        .with_spoke_pool(ChainId::new(CHAIN_A), spoke_pool_a())
        .with_spoke_pool(ChainId::new(CHAIN_B), spoke_pool_b())
}

#[tokio::test]
async fn s1_simple_propose_yields_refund_and_pool_rebalance_leaves() {
    let config = base_config();
    let hub_pool = base_hub_pool();
    let config_store = MockConfigStoreClient::default();

    let deposit = fixtures::deposit(CHAIN_A, CHAIN_B, 7, 1000, 150);
    let relayer = Address::repeat_byte(0xF1);
    let fill = fixtures::full_fill(&deposit, relayer, CHAIN_B, 550);

    let mut clients = HashMap::new();
    clients.insert(ChainId::new(CHAIN_A), MockSpokePoolClient::new(ChainId::new(CHAIN_A)).with_deposit(deposit));
    clients.insert(ChainId::new(CHAIN_B), MockSpokePoolClient::new(ChainId::new(CHAIN_B)).with_fill(fill));

    let ranges = vec![BlockRange::new(100, 200), BlockRange::new(500, 600)];
    let loaded = load_bundle_data(&config, &hub_pool, &config_store, &clients, &ranges, 1_000).await.unwrap();

    assert!(loaded.unfilled_deposits.is_empty(), "fully filled deposit should not be unfilled");

    let pool_rebalance =
        build_pool_rebalance_root(&config, &hub_pool, &config_store, &loaded.fills_to_refund, &loaded.deposits, &loaded.slow_fill_excess, 1_000)
            .await
            .unwrap();
    assert_eq!(pool_rebalance.leaves.len(), 2, "one leaf per chain touched");

    let relayer_refund = build_relayer_refund_root(
        &config,
        &hub_pool,
        &config_store,
        &loaded.fills_to_refund,
        &pool_rebalance.leaves,
        1_000
    )
    .await
    .unwrap();
    assert_eq!(relayer_refund.leaves.len(), 1);
    let leaf = &relayer_refund.leaves[0];
    assert_eq!(leaf.refund_addresses, vec![relayer]);
    assert_eq!(leaf.refund_amounts, vec![U256::from(1000u64)]);
    assert_eq!(leaf.amount_to_return, U256::ZERO);

    let slow_relay = build_slow_relay_root(&loaded.unfilled_deposits);
    assert!(slow_relay.leaves.is_empty());
}

#[tokio::test]
async fn s2_partial_fill_produces_one_slow_relay_leaf() {
    let config = base_config();
    let hub_pool = base_hub_pool();
    let config_store = MockConfigStoreClient::default();

    let deposit = fixtures::deposit(CHAIN_A, CHAIN_B, 7, 1000, 150);
    let relayer = Address::repeat_byte(0xF1);
    let fill = fixtures::partial_fill(&deposit, relayer, CHAIN_B, U256::from(400u64), 550);

    let mut clients = HashMap::new();
    clients.insert(ChainId::new(CHAIN_A), MockSpokePoolClient::new(ChainId::new(CHAIN_A)).with_deposit(deposit));
    clients.insert(ChainId::new(CHAIN_B), MockSpokePoolClient::new(ChainId::new(CHAIN_B)).with_fill(fill));

    let ranges = vec![BlockRange::new(100, 200), BlockRange::new(500, 600)];
    let loaded = load_bundle_data(&config, &hub_pool, &config_store, &clients, &ranges, 1_000).await.unwrap();

    assert_eq!(loaded.unfilled_deposits.len(), 1);
    assert_eq!(loaded.unfilled_deposits[0].unfilled_amount, U256::from(600u64));

    let slow_relay = build_slow_relay_root(&loaded.unfilled_deposits);
    assert_eq!(slow_relay.leaves.len(), 1);
    assert_eq!(slow_relay.leaves[0].amount, U256::from(1000u64), "leaf carries the full deposit amount");

    let pool_rebalance =
        build_pool_rebalance_root(&config, &hub_pool, &config_store, &loaded.fills_to_refund, &loaded.deposits, &loaded.slow_fill_excess, 1_000)
            .await
            .unwrap();
    let relayer_refund = build_relayer_refund_root(
        &config,
        &hub_pool,
        &config_store,
        &loaded.fills_to_refund,
        &pool_rebalance.leaves,
        1_000
    )
    .await
    .unwrap();
    assert_eq!(relayer_refund.leaves[0].refund_amounts, vec![U256::from(400u64)]);
}

#[tokio::test]
async fn s3_invalid_fill_is_excluded_from_every_output() {
    let config = base_config();
    let hub_pool = base_hub_pool();
    let config_store = MockConfigStoreClient::default();

    // A fill on chain B referencing a deposit id never seen on chain A.
    let phantom_deposit = fixtures::deposit(CHAIN_A, CHAIN_B, 999, 1000, 150);
    let relayer = Address::repeat_byte(0xF1);
    let fill = fixtures::full_fill(&phantom_deposit, relayer, CHAIN_B, 550);

    let mut clients = HashMap::new();
    clients.insert(ChainId::new(CHAIN_A), MockSpokePoolClient::new(ChainId::new(CHAIN_A)));
    clients.insert(ChainId::new(CHAIN_B), MockSpokePoolClient::new(ChainId::new(CHAIN_B)).with_fill(fill));

    let ranges = vec![BlockRange::new(100, 200), BlockRange::new(500, 600)];
    let loaded = load_bundle_data(&config, &hub_pool, &config_store, &clients, &ranges, 1_000).await.unwrap();

    assert!(loaded.fills_to_refund.is_empty());
    assert!(loaded.unfilled_deposits.is_empty());
}

fn providers_for(expected_end_a: u64, expected_end_b: u64) -> HashMap<ChainId, MockChainProvider> {
    let mut providers = HashMap::new();
    providers.insert(ChainId::new(CHAIN_A), MockChainProvider { chain_id: ChainId::new(CHAIN_A), latest_block_number: expected_end_a });
    providers.insert(ChainId::new(CHAIN_B), MockChainProvider { chain_id: ChainId::new(CHAIN_B), latest_block_number: expected_end_b });
    providers
}

#[tokio::test]
async fn s4_validate_accepts_matching_roots() {
    let config = base_config();
    let mut hub_pool = base_hub_pool();
    hub_pool.current_time = 100;
    hub_pool.latest_block_number = 1_000;
    hub_pool.next_bundle_start_blocks.insert(ChainId::new(CHAIN_A), 100);
    hub_pool.next_bundle_start_blocks.insert(ChainId::new(CHAIN_B), 500);

    let config_store = MockConfigStoreClient::default();

    let deposit = fixtures::deposit(CHAIN_A, CHAIN_B, 7, 1000, 150);
    let relayer = Address::repeat_byte(0xF1);
    let fill = fixtures::full_fill(&deposit, relayer, CHAIN_B, 550);

    let mut clients = HashMap::new();
    clients.insert(ChainId::new(CHAIN_A), MockSpokePoolClient::new(ChainId::new(CHAIN_A)).with_deposit(deposit));
    clients.insert(ChainId::new(CHAIN_B), MockSpokePoolClient::new(ChainId::new(CHAIN_B)).with_fill(fill));

    // Rebuild the "true" roots with exactly the ranges run_validate_cycle
    // will derive (expected starts through the pending proposal's own end
    // blocks) so the pending proposal can be made to match them below.
    let ranges = vec![BlockRange::new(100, 200), BlockRange::new(500, 600)];
    let loaded = load_bundle_data(&config, &hub_pool, &config_store, &clients, &ranges, 1_000).await.unwrap();
    let pool_rebalance =
        build_pool_rebalance_root(&config, &hub_pool, &config_store, &loaded.fills_to_refund, &loaded.deposits, &loaded.slow_fill_excess, 1_000)
            .await
            .unwrap();
    let relayer_refund = build_relayer_refund_root(
        &config,
        &hub_pool,
        &config_store,
        &loaded.fills_to_refund,
        &pool_rebalance.leaves,
        1_000
    )
    .await
    .unwrap();
    let slow_relay = build_slow_relay_root(&loaded.unfilled_deposits);

    hub_pool.pending_proposal = std::sync::Mutex::new(Some(RootBundle {
        proposer: Address::ZERO,
        challenge_period_end_timestamp: 10_000,
        bundle_evaluation_block_numbers: vec![200, 600],
        unclaimed_pool_rebalance_leaf_count: pool_rebalance.leaves.len() as u32,
        pool_rebalance_root: pool_rebalance.tree.get_hex_root(),
        relayer_refund_root: relayer_refund.tree.get_hex_root(),
        slow_relay_root: slow_relay.tree.get_hex_root()
    }));

    let providers = providers_for(200, 600);
    let tx_sink = MockTransactionSink::default();
    let metrics = DataworkerMetrics::new();
    let outcome = run_validate_cycle(&config, &hub_pool, &config_store, &providers, &mut clients, &tx_sink, &metrics).await.unwrap();

    assert_eq!(outcome, ValidationOutcome::Accept);
    assert!(tx_sink.enqueued.lock().unwrap().is_empty());
}

#[tokio::test]
async fn s5_validate_disputes_on_root_mismatch() {
    let config = base_config();
    let mut hub_pool = base_hub_pool();
    hub_pool.current_time = 100;
    hub_pool.latest_block_number = 1_000;
    hub_pool.next_bundle_start_blocks.insert(ChainId::new(CHAIN_A), 100);
    hub_pool.next_bundle_start_blocks.insert(ChainId::new(CHAIN_B), 500);
    hub_pool.pending_proposal = std::sync::Mutex::new(Some(RootBundle {
        proposer: Address::ZERO,
        challenge_period_end_timestamp: 10_000,
        bundle_evaluation_block_numbers: vec![200, 600],
        unclaimed_pool_rebalance_leaf_count: 1,
        pool_rebalance_root: B256::repeat_byte(0xAB),
        relayer_refund_root: B256::repeat_byte(0xCD),
        slow_relay_root: B256::ZERO
    }));

    let config_store = MockConfigStoreClient::default();
    let mut clients = HashMap::new();
    clients.insert(ChainId::new(CHAIN_A), MockSpokePoolClient::new(ChainId::new(CHAIN_A)));
    clients.insert(ChainId::new(CHAIN_B), MockSpokePoolClient::new(ChainId::new(CHAIN_B)));
    let providers = providers_for(200, 600);
    let tx_sink = MockTransactionSink::default();

    let metrics = DataworkerMetrics::new();
    let outcome = run_validate_cycle(&config, &hub_pool, &config_store, &providers, &mut clients, &tx_sink, &metrics).await.unwrap();

    assert_eq!(outcome, ValidationOutcome::Disputed);
    assert_eq!(tx_sink.enqueued.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn s6_validate_defers_within_buffer() {
    let mut config = base_config();
    config.end_block_buffers.insert(ChainId::new(CHAIN_A), 5);

    let mut hub_pool = base_hub_pool();
    hub_pool.current_time = 100;
    hub_pool.latest_block_number = 1_000;
    hub_pool.next_bundle_start_blocks.insert(ChainId::new(CHAIN_A), 100);
    hub_pool.next_bundle_start_blocks.insert(ChainId::new(CHAIN_B), 500);
    // Chain A's pending end block is 3 past the locally observed latest
    // block (200), within the configured buffer of 5.
    hub_pool.pending_proposal = std::sync::Mutex::new(Some(RootBundle {
        proposer: Address::ZERO,
        challenge_period_end_timestamp: 10_000,
        bundle_evaluation_block_numbers: vec![203, 600],
        unclaimed_pool_rebalance_leaf_count: 1,
        pool_rebalance_root: B256::repeat_byte(0xAB),
        relayer_refund_root: B256::ZERO,
        slow_relay_root: B256::ZERO
    }));

    let config_store = MockConfigStoreClient::default();
    let mut clients = HashMap::new();
    clients.insert(ChainId::new(CHAIN_A), MockSpokePoolClient::new(ChainId::new(CHAIN_A)));
    clients.insert(ChainId::new(CHAIN_B), MockSpokePoolClient::new(ChainId::new(CHAIN_B)));
    let providers = providers_for(200, 600);
    let tx_sink = MockTransactionSink::default();

    let metrics = DataworkerMetrics::new();
    let outcome = run_validate_cycle(&config, &hub_pool, &config_store, &providers, &mut clients, &tx_sink, &metrics).await.unwrap();

    assert_eq!(outcome, ValidationOutcome::Defer);
    assert!(tx_sink.enqueued.lock().unwrap().is_empty());
}
