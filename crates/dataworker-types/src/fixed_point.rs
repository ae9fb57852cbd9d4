use alloy_primitives::{I256, U256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed-point scale used by `relayerFeePct` / `realizedLpFeePct`: both are
/// signed fractions of 1e18, mirroring the on-chain `FixedPoint` convention.
pub const FIXED_POINT_SCALE: u128 = 1_000_000_000_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FixedPointError {
    #[error("fixed-point multiplication overflowed")]
    MulOverflow,
    #[error("fixed-point division by zero")]
    DivByZero
}

/// A signed fixed-point percentage scaled by [`FIXED_POINT_SCALE`].
///
/// Token amounts are bounded well under `2**200` in practice, and the scale
/// is `1e18`, so `amount * pct` fits in a `U256` without a wider intermediate
/// type; `checked_mul`/`checked_div` is enough to catch the degenerate case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedFixedPoint(pub I256);

impl SignedFixedPoint {
    pub const ZERO: SignedFixedPoint = SignedFixedPoint(I256::ZERO);

    pub fn from_raw(raw: I256) -> Self {
        Self(raw)
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// Applies this percentage to a non-negative token `amount`, returning
    /// `amount * pct / 1e18`. Callers in this crate only ever multiply
    /// non-negative fee percentages (`realizedLpFeePct`) against amounts, so
    /// the result is represented as an unsigned `U256`; a negative
    /// percentage is a data anomaly the caller should reject upstream.
    pub fn checked_mul_amount(&self, amount: U256) -> Result<U256, FixedPointError> {
        let pct_abs = self.0.unsigned_abs();
        let scale = U256::from(FIXED_POINT_SCALE);
        let product = amount.checked_mul(pct_abs).ok_or(FixedPointError::MulOverflow)?;
        product.checked_div(scale).ok_or(FixedPointError::DivByZero)
    }
}

impl From<I256> for SignedFixedPoint {
    fn from(value: I256) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_fee_pct() {
        // 0.001 (10 bps) of 1_000_000
        let pct = SignedFixedPoint::from_raw(I256::try_from(1_000_000_000_000_000i128).unwrap());
        let amount = U256::from(1_000_000u64);
        let fee = pct.checked_mul_amount(amount).unwrap();
        assert_eq!(fee, U256::from(1_000u64));
    }

    #[test]
    fn zero_pct_yields_zero_fee() {
        let amount = U256::from(12345u64);
        let fee = SignedFixedPoint::ZERO.checked_mul_amount(amount).unwrap();
        assert_eq!(fee, U256::ZERO);
    }
}
