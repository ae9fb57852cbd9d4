//! The three root builders: Slow Relay (C2), Relayer Refund (C3), and Pool
//! Rebalance (C4).

pub mod pool_rebalance;
pub mod relayer_refund;
pub mod slow_relay;

pub use pool_rebalance::{build_pool_rebalance_root, PoolRebalanceRoot};
pub use relayer_refund::{build_relayer_refund_root, RelayerRefundRoot};
pub use slow_relay::{build_slow_relay_root, SlowRelayRoot};
