//! Mock client implementations and fixture builders, used only from
//! `[dev-dependencies]` by the other crates' test suites.

pub mod fixtures;
pub mod mocks;

pub use mocks::{MockChainProvider, MockConfigStoreClient, MockHubPoolClient, MockSpokePoolClient, MockTransactionSink};
