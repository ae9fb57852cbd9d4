use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use auto_impl::auto_impl;

use crate::error::ClientError;

/// Read access to the ConfigStore contract's per-block protocol parameters.
#[async_trait]
#[auto_impl(Arc)]
pub trait ConfigStoreClient: Send + Sync {
    /// Whether this client has completed its initial event backfill.
    fn is_updated(&self) -> bool;

    /// `maxRefundCount` for relayer-refund leaf chunking, as of
    /// `mainnet_block`.
    async fn get_max_refund_count_for_relayer_refund_leaf_for_block(&self, mainnet_block: u64) -> Result<u32, ClientError>;

    /// Dust-suppression transfer threshold for `l1_token`, as of
    /// `mainnet_block`.
    async fn get_token_transfer_threshold_for_block(&self, l1_token: Address, mainnet_block: u64) -> Result<U256, ClientError>;

    /// `maxL1TokenCount` for pool-rebalance leaf chunking, as of
    /// `mainnet_block`. Named alongside
    /// `get_max_refund_count_for_relayer_refund_leaf_for_block` in the
    /// ConfigStore's per-block parameter set; see DESIGN.md for why this
    /// getter exists alongside the refund-count one.
    async fn get_max_l1_token_count_for_block(&self, mainnet_block: u64) -> Result<u32, ClientError>;
}
