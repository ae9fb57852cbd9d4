use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::deposit::Deposit;

/// A deposit whose fills did not fully cover `amount` by the end of the
/// bundle's block ranges. Feeds the Slow Relay Root (C2).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnfilledDeposit {
    pub deposit:                Deposit,
    /// `deposit.amount - max(totalFilledAmount across the deposit's fills)`.
    /// Always strictly positive (Testable property 6); fully filled deposits
    /// never reach this type.
    pub unfilled_amount:        U256,
    /// Whether the first-ever fill seen for this deposit (in destination
    /// chain event order) fell inside the evaluated block range.
    pub has_first_fill_in_range: bool
}
