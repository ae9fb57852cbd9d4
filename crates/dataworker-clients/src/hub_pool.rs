use alloy_primitives::Address;
use async_trait::async_trait;
use auto_impl::auto_impl;
use dataworker_types::{ChainId, RootBundle};

use crate::error::ClientError;

/// Token metadata as reported by the HubPool's token registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub symbol: String,
    pub decimals: u8
}

/// Read/write access to the mainnet HubPool contract.
///
/// Implementors are expected to be cheap to clone (an `Arc`-wrapped RPC
/// client), hence the `auto_impl(Arc)` blanket so `Arc<dyn HubPoolClient>`
/// and concrete types are interchangeable at call sites.
#[async_trait]
#[auto_impl(Arc)]
pub trait HubPoolClient: Send + Sync {
    /// Whether this client has completed its initial event backfill.
    fn is_updated(&self) -> bool;

    /// Whether a root bundle proposal is currently pending (awaiting
    /// challenge-period expiry or dispute).
    async fn has_pending_proposal(&self) -> Result<bool, ClientError>;

    /// The currently pending proposal, if any.
    async fn get_pending_root_bundle_proposal(&self) -> Result<Option<RootBundle>, ClientError>;

    /// HubPool contract's notion of current time (block timestamp of its
    /// latest observed block), used to evaluate challenge-window expiry.
    async fn current_time(&self) -> Result<u64, ClientError>;

    /// Latest mainnet block number the client has observed.
    async fn latest_block_number(&self) -> Result<u64, ClientError>;

    /// The SpokePool address that was canonical for `chain_id` as of
    /// `mainnet_block` (deposits against a since-deprecated SpokePool must
    /// still be served by the address that was live when they were made).
    async fn get_spoke_pool_for_block(&self, mainnet_block: u64, chain_id: ChainId) -> Result<Address, ClientError>;

    /// The L2 token on `chain_id` that corresponds to `l1_token`.
    async fn get_destination_token_for_l1_token_destination_chain_id(
        &self,
        l1_token: Address,
        chain_id: ChainId
    ) -> Result<Address, ClientError>;

    /// The L1 token that `l2_token` on `chain_id` maps back to, as of
    /// `mainnet_block`.
    async fn get_l1_token_counterpart_at_block(
        &self,
        chain_id: ChainId,
        l2_token: Address,
        mainnet_block: u64
    ) -> Result<Address, ClientError>;

    /// One past the end block of the last executed bundle for `chain_id`, or
    /// `0` if none has ever executed.
    async fn get_next_bundle_start_block_number(
        &self,
        chain_ids: &[ChainId],
        latest_mainnet_block: u64,
        chain_id: ChainId
    ) -> Result<u64, ClientError>;

    /// Symbol/decimals for `token` on `chain_id`.
    async fn get_token_info(&self, chain_id: ChainId, token: Address) -> Result<TokenInfo, ClientError>;

    /// Enqueues a `proposeRootBundle` transaction.
    async fn propose_root_bundle(
        &self,
        bundle_evaluation_block_numbers: Vec<u64>,
        pool_rebalance_leaf_count: u32,
        pool_rebalance_root: alloy_primitives::B256,
        relayer_refund_root: alloy_primitives::B256,
        slow_relay_root: alloy_primitives::B256
    ) -> Result<(), ClientError>;

    /// Enqueues a `disputeRootBundle` transaction with a human-readable
    /// Markdown diagnostic.
    async fn dispute_root_bundle(&self, reason_markdown: String) -> Result<(), ClientError>;
}
