use std::collections::HashMap;
use std::fmt::Write as _;

use dataworker_clients::{ChainProvider, ConfigStoreClient, DataworkerTransaction, HubPoolClient, SpokePoolClient, TransactionSink};
use dataworker_types::{BlockRange, ChainId, DataworkerConfig, RootBundle};
use dataworker_metrics::DataworkerMetrics;
use futures::future::try_join_all;
use tracing::info;

use crate::{controller::propose::build_all_roots, error::DataworkerError};

/// Outcome of a validate cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// No pending proposal, or the challenge window has already expired.
    Quiet,
    /// An end block fell within `(expectedEnd, expectedEnd + buffer]`; the
    /// peer may simply be ahead. No transaction, no dispute.
    Defer,
    /// Rebuilt roots matched the pending proposal exactly.
    Accept,
    /// A dispute was enqueued.
    Disputed
}

/// The Validation Controller (C6). Evaluates a pending proposal through a
/// fixed sequence of checks — empty-root sentinel, block-count shape,
/// range-vs-expected bounds, then a full root rebuild and comparison — and
/// enqueues a dispute, defers, accepts, or returns quietly.
pub async fn run_validate_cycle<H, C, S, P, T>(
    config: &DataworkerConfig,
    hub_pool: &H,
    config_store: &C,
    providers: &HashMap<ChainId, P>,
    spoke_pool_clients: &mut HashMap<ChainId, S>,
    tx_sink: &T,
    metrics: &DataworkerMetrics
) -> Result<ValidationOutcome, DataworkerError>
where
    H: HubPoolClient,
    C: ConfigStoreClient,
    S: SpokePoolClient,
    P: ChainProvider,
    T: TransactionSink
{
    let Some(pending) = hub_pool.get_pending_root_bundle_proposal().await? else {
        return Ok(ValidationOutcome::Quiet);
    };

    let now = hub_pool.current_time().await?;
    if now >= pending.challenge_period_end_timestamp {
        info!("challenge window already expired, nothing to validate");
        return Ok(ValidationOutcome::Quiet);
    }

    if pending.has_empty_pool_rebalance_root() {
        return dispute(
            tx_sink,
            metrics,
            "Pending proposal carries the empty pool-rebalance-root sentinel, which is never valid.".to_string()
        )
        .await;
    }

    if pending.bundle_evaluation_block_numbers.len() != config.chain_ids.len() {
        return dispute(
            tx_sink,
            metrics,
            format!(
                "Expected {} bundle evaluation block numbers, pending proposal has {}.",
                config.chain_ids.len(),
                pending.bundle_evaluation_block_numbers.len()
            )
        )
        .await;
    }

    let latest_mainnet_block = hub_pool.latest_block_number().await?;
    let expected_starts = try_join_all(
        config
            .chain_ids
            .iter()
            .map(|chain_id| hub_pool.get_next_bundle_start_block_number(&config.chain_ids, latest_mainnet_block, *chain_id))
    )
    .await?;

    for (i, chain_id) in config.chain_ids.iter().enumerate() {
        let pending_end = pending.bundle_evaluation_block_numbers[i];
        if pending_end < expected_starts[i] {
            return dispute(
                tx_sink,
                metrics,
                format!("Chain {chain_id}: pending end block {pending_end} is before expected start {}.", expected_starts[i])
            )
            .await;
        }
    }

    let expected_ends = try_join_all(config.chain_ids.iter().map(|chain_id| async {
        let provider = providers
            .get(chain_id)
            .ok_or_else(|| DataworkerError::Precondition(format!("no chain provider configured for chain {chain_id}")))?;
        let block = provider.get_block_number().await?;
        Ok::<u64, DataworkerError>(block)
    }))
    .await?;

    for (i, chain_id) in config.chain_ids.iter().enumerate() {
        let pending_end = pending.bundle_evaluation_block_numbers[i];
        let buffer = config.end_block_buffer(*chain_id);
        if pending_end > expected_ends[i] + buffer {
            return dispute(
                tx_sink,
                metrics,
                format!(
                    "Chain {chain_id}: pending end block {pending_end} exceeds expected end {} plus buffer {buffer}.",
                    expected_ends[i]
                )
            )
            .await;
        }
        if pending_end > expected_ends[i] {
            info!(%chain_id, pending_end, expected_end = expected_ends[i], "end block within buffer, deferring");
            return Ok(ValidationOutcome::Defer);
        }
    }

    let ranges: Vec<BlockRange> =
        expected_starts.iter().zip(pending.bundle_evaluation_block_numbers.iter()).map(|(s, e)| BlockRange::new(*s, *e)).collect();

    try_join_all(spoke_pool_clients.values_mut().map(|client| async {
        let spoke_pool_address = hub_pool.get_spoke_pool_for_block(latest_mainnet_block, client.chain_id()).await?;
        client.update(spoke_pool_address).await
    }))
    .await?;

    let (pool_rebalance, relayer_refund, slow_relay) =
        build_all_roots(config, hub_pool, config_store, spoke_pool_clients, &ranges, latest_mainnet_block).await?;

    metrics.set_leaf_count("pool_rebalance", pool_rebalance.leaves.len());
    metrics.set_leaf_count("relayer_refund", relayer_refund.leaves.len());
    metrics.set_leaf_count("slow_relay", slow_relay.leaves.len());

    if let Some(mismatch) = first_root_mismatch(&pending, &pool_rebalance.tree, &relayer_refund.tree, &slow_relay.tree) {
        return dispute(tx_sink, metrics, mismatch).await;
    }

    metrics.increment_validate_cycles();
    info!("pending proposal matches locally rebuilt roots, accepting");
    Ok(ValidationOutcome::Accept)
}

fn first_root_mismatch(
    pending: &RootBundle,
    pool_rebalance: &dataworker_merkle::MerkleTree,
    relayer_refund: &dataworker_merkle::MerkleTree,
    slow_relay: &dataworker_merkle::MerkleTree
) -> Option<String> {
    if pending.pool_rebalance_root != pool_rebalance.get_hex_root() {
        return Some("Unexpected pool rebalance root.".to_string());
    }
    if pending.relayer_refund_root != relayer_refund.get_hex_root() {
        return Some("Unexpected relayer refund root.".to_string());
    }
    if pending.slow_relay_root != slow_relay.get_hex_root() {
        return Some("Unexpected slow relay root.".to_string());
    }
    None
}

async fn dispute<T>(tx_sink: &T, metrics: &DataworkerMetrics, reason: String) -> Result<ValidationOutcome, DataworkerError>
where
    T: TransactionSink
{
    let mut markdown = String::new();
    let _ = writeln!(markdown, "## Dataworker dispute\n\n{reason}");

    tx_sink.enqueue(DataworkerTransaction::DisputeRootBundle { reason_markdown: markdown }).await?;
    metrics.increment_disputes();
    info!(%reason, "disputeRootBundle enqueued");
    Ok(ValidationOutcome::Disputed)
}
