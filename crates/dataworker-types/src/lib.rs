//! Data model for the Dataworker bundle-construction core: deposits and
//! fills read from per-chain SpokePool event histories, the intermediate
//! refund/balance maps built while correlating them, and the three leaf
//! types that get hashed into the roots a bundle proposal commits to.

pub mod chain;
pub mod config;
pub mod deposit;
pub mod fill;
pub mod fixed_point;
pub mod leaves;
pub mod refund;
pub mod root_bundle;
pub mod running_balance;
pub mod unfilled;

pub use chain::{BlockRange, ChainId};
pub use config::DataworkerConfig;
pub use deposit::{Deposit, DepositKey, DepositWithBlock};
pub use fill::{Fill, FillWithBlock};
pub use fixed_point::{FixedPointError, SignedFixedPoint};
pub use leaves::{
    PoolRebalanceLeaf, RelayerRefundLeaf, RelayerRefundLeafConstruction, SlowRelayLeaf
};
pub use refund::{FillsToRefund, RefundBucket};
pub use root_bundle::{RootBundle, EMPTY_ROOT};
pub use running_balance::{RealizedLpFees, RunningBalances};
pub use unfilled::UnfilledDeposit;
