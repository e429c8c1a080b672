//! Token amount type.
//!
//! Amounts are fixed-point integers (u128) with 18 fractional digits.
//! The smallest unit is 1 raw; one whole token is [`ONE_TOKEN`] raw.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Number of fractional digits in a token amount.
pub const DECIMALS: u8 = 18;

/// Raw units in one whole token (10^18).
pub const ONE_TOKEN: u128 = 1_000_000_000_000_000_000;

/// Whole tokens credited to the owner at genesis.
pub const GENESIS_SUPPLY_TOKENS: u128 = 10_000_000;

/// Genesis supply in raw units: 10,000,000 × 10^18.
pub const INITIAL_SUPPLY: TokenAmount = TokenAmount(GENESIS_SUPPLY_TOKENS * ONE_TOKEN);

/// A non-negative token amount in raw units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenAmount(u128);

impl TokenAmount {
    pub const ZERO: Self = Self(0);

    pub fn new(raw: u128) -> Self {
        Self(raw)
    }

    /// Convert whole tokens into raw units. `None` on overflow.
    pub fn from_tokens(whole: u128) -> Option<Self> {
        whole.checked_mul(ONE_TOKEN).map(Self)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl Add for TokenAmount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for TokenAmount {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl From<u128> for TokenAmount {
    fn from(raw: u128) -> Self {
        Self(raw)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
