use std::collections::HashMap;

use dataworker_clients::{ChainProvider, ConfigStoreClient, DataworkerTransaction, HubPoolClient, SpokePoolClient, TransactionSink};
use dataworker_types::{BlockRange, ChainId, DataworkerConfig};
use dataworker_metrics::DataworkerMetrics;
use dataworker_utils::async_time_fn;
use futures::future::try_join_all;
use tracing::info;

use crate::{
    error::DataworkerError,
    loader::load_bundle_data,
    roots::{build_pool_rebalance_root, build_relayer_refund_root, build_slow_relay_root}
};

/// The Proposal Controller (C5).
///
/// Runs one propose cycle to completion: computes the widest legal block
/// range, builds all three roots, and enqueues a proposal if there's
/// anything to propose. Returns `Ok(false)` for every quiet "nothing to do"
/// outcome (already pending, or an empty pool-rebalance root) and `Ok(true)`
/// when a proposal was enqueued.
pub async fn run_propose_cycle<H, C, S, P, T>(
    config: &DataworkerConfig,
    hub_pool: &H,
    config_store: &C,
    providers: &HashMap<ChainId, P>,
    spoke_pool_clients: &mut HashMap<ChainId, S>,
    tx_sink: &T,
    metrics: &DataworkerMetrics
) -> Result<bool, DataworkerError>
where
    H: HubPoolClient,
    C: ConfigStoreClient,
    S: SpokePoolClient,
    P: ChainProvider,
    T: TransactionSink
{
    if !hub_pool.is_updated() {
        return Err(DataworkerError::Precondition("HubPool client is not updated".into()));
    }
    if hub_pool.has_pending_proposal().await? {
        info!("proposal already pending, nothing to propose");
        return Ok(false);
    }

    let latest_mainnet_block = hub_pool.latest_block_number().await?;

    // Widest possible expected block range, read in parallel: launched
    // together and joined, no interleaved mutation of shared state.
    let starts = try_join_all(
        config
            .chain_ids
            .iter()
            .map(|chain_id| hub_pool.get_next_bundle_start_block_number(&config.chain_ids, latest_mainnet_block, *chain_id))
    )
    .await?;
    let ends = try_join_all(config.chain_ids.iter().map(|chain_id| async {
        let provider = providers
            .get(chain_id)
            .ok_or_else(|| DataworkerError::Precondition(format!("no chain provider configured for chain {chain_id}")))?;
        let block = provider.get_block_number().await?;
        Ok::<u64, DataworkerError>(block)
    }))
    .await?;

    let ranges: Vec<BlockRange> = starts.iter().zip(ends.iter()).map(|(s, e)| BlockRange::new(*s, *e)).collect();
    info!(?ranges, "computed propose block ranges");

    // Resolve each chain's canonical SpokePool address as of the current
    // mainnet block, then update every client in parallel against it. Each
    // future borrows a distinct map entry, so this doesn't need locking.
    try_join_all(spoke_pool_clients.values_mut().map(|client| async {
        let spoke_pool_address = hub_pool.get_spoke_pool_for_block(latest_mainnet_block, client.chain_id()).await?;
        client.update(spoke_pool_address).await
    }))
    .await?;

    let (result, elapsed) = async_time_fn(|| async {
        build_all_roots(config, hub_pool, config_store, spoke_pool_clients, &ranges, latest_mainnet_block).await
    })
    .await;
    metrics.record_root_build_time(elapsed);
    let (pool_rebalance, relayer_refund, slow_relay) = result?;

    metrics.set_leaf_count("pool_rebalance", pool_rebalance.leaves.len());
    metrics.set_leaf_count("relayer_refund", relayer_refund.leaves.len());
    metrics.set_leaf_count("slow_relay", slow_relay.leaves.len());

    if pool_rebalance.leaves.is_empty() {
        info!("pool rebalance root has zero leaves, nothing to propose");
        return Ok(false);
    }

    tx_sink
        .enqueue(DataworkerTransaction::ProposeRootBundle {
            bundle_evaluation_block_numbers: ends,
            pool_rebalance_leaf_count: pool_rebalance.leaves.len() as u32,
            pool_rebalance_root: pool_rebalance.tree.get_hex_root(),
            relayer_refund_root: relayer_refund.tree.get_hex_root(),
            slow_relay_root: slow_relay.tree.get_hex_root()
        })
        .await?;

    metrics.increment_propose_cycles();
    info!("proposeRootBundle enqueued");
    Ok(true)
}

type BuiltRoots = (
    crate::roots::PoolRebalanceRoot,
    crate::roots::RelayerRefundRoot,
    crate::roots::SlowRelayRoot
);

pub(crate) async fn build_all_roots<H, C, S>(
    config: &DataworkerConfig,
    hub_pool: &H,
    config_store: &C,
    spoke_pool_clients: &HashMap<ChainId, S>,
    ranges: &[BlockRange],
    mainnet_block: u64
) -> Result<BuiltRoots, DataworkerError>
where
    H: HubPoolClient,
    C: ConfigStoreClient,
    S: SpokePoolClient
{
    let loaded = load_bundle_data(config, hub_pool, config_store, spoke_pool_clients, ranges, mainnet_block).await?;

    let pool_rebalance = build_pool_rebalance_root(
        config,
        hub_pool,
        config_store,
        &loaded.fills_to_refund,
        &loaded.deposits,
        &loaded.slow_fill_excess,
        mainnet_block
    )
    .await?;

    let relayer_refund = build_relayer_refund_root(
        config,
        hub_pool,
        config_store,
        &loaded.fills_to_refund,
        &pool_rebalance.leaves,
        mainnet_block
    )
    .await?;

    let slow_relay = build_slow_relay_root(&loaded.unfilled_deposits);

    Ok((pool_rebalance, relayer_refund, slow_relay))
}
