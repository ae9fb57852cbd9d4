use alloy_primitives::B256;
use async_trait::async_trait;
use auto_impl::auto_impl;

use crate::error::ClientError;

/// A single enqueued Dataworker transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataworkerTransaction {
    ProposeRootBundle {
        bundle_evaluation_block_numbers: Vec<u64>,
        pool_rebalance_leaf_count: u32,
        pool_rebalance_root: B256,
        relayer_refund_root: B256,
        slow_relay_root: B256
    },
    DisputeRootBundle { reason_markdown: String }
}

/// Fire-and-forget multicaller queue shared across cycles.
///
/// Enqueuing is idempotent-by-intent: the HubPool itself rejects duplicate
/// proposals on-chain, so a double-enqueue from two independent cycles is
/// safe but wasteful, never unsafe.
#[async_trait]
#[auto_impl(Arc)]
pub trait TransactionSink: Send + Sync {
    async fn enqueue(&self, tx: DataworkerTransaction) -> Result<(), ClientError>;
}
