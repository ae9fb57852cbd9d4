use async_trait::async_trait;
use auto_impl::auto_impl;
use dataworker_types::ChainId;

use crate::error::ClientError;

/// Minimal per-chain RPC surface needed outside the SpokePool/HubPool event
/// indexers: current block height and network identity.
#[async_trait]
#[auto_impl(Arc)]
pub trait ChainProvider: Send + Sync {
    /// The chain this provider talks to.
    fn chain_id(&self) -> ChainId;

    /// Latest block number observed on this chain.
    async fn get_block_number(&self) -> Result<u64, ClientError>;
}
