//! The external-collaborator client traits the Dataworker's algorithms are
//! built against.
//!
//! These are interfaces only: event indexing, the configuration store,
//! transaction submission, and network-block-number retrieval are all
//! treated as external collaborators. `dataworker-testing` provides mock
//! implementations for use in tests; RPC-backed production wiring lives
//! outside this workspace.

mod config_store;
mod error;
mod hub_pool;
mod provider;
mod spoke_pool;
mod tx_sink;

pub use config_store::ConfigStoreClient;
pub use error::ClientError;
pub use hub_pool::{HubPoolClient, TokenInfo};
pub use provider::ChainProvider;
pub use spoke_pool::SpokePoolClient;
pub use tx_sink::{DataworkerTransaction, TransactionSink};
