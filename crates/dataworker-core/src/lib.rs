//! The Dataworker's core algorithms: bundle data loading (C1), the three
//! root builders (C2-C4), and the propose/validate controllers (C5, C6).
//!
//! Everything here is a pure function of a read-only snapshot plus the
//! fixed chain-ID evaluation order: no component here retains state across
//! cycles.

pub mod controller;
pub mod error;
pub mod loader;
pub mod roots;

pub use controller::{run_propose_cycle, run_validate_cycle, ValidationOutcome};
pub use error::DataworkerError;
pub use loader::{load_bundle_data, LoadedBundleData};
pub use roots::{
    build_pool_rebalance_root, build_relayer_refund_root, build_slow_relay_root, PoolRebalanceRoot, RelayerRefundRoot, SlowRelayRoot
};
