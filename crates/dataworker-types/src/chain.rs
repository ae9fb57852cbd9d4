use std::fmt;

use serde::{Deserialize, Serialize};

/// An EVM chain id. Newtype over `u64` so chain ids can't be accidentally
/// confused with block numbers or token amounts at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChainId(pub u64);

impl ChainId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ChainId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// An inclusive `[start, end]` block range evaluated for one chain in a
/// bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRange {
    pub start: u64,
    pub end:   u64
}

impl BlockRange {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// `start <= block_number <= end`.
    pub fn contains(&self, block_number: u64) -> bool {
        self.start <= block_number && block_number <= self.end
    }
}
