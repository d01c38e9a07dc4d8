use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{RatioSwapError, Result};

/// Non-negative integer quantity of base units (token units or native currency units)
///
/// Arithmetic that can leave the representable range is only exposed in
/// checked form; the ledger never wraps or saturates a balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(u128);

impl Amount {
    /// Zero amount
    pub const ZERO: Amount = Amount(0);

    pub const fn new(units: u128) -> Self {
        Amount(units)
    }

    /// Get the raw number of base units
    pub const fn units(&self) -> u128 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition
    pub fn checked_add(&self, other: Self) -> Result<Self> {
        self.0
            .checked_add(other.0)
            .map(Amount)
            .ok_or_else(|| RatioSwapError::InvalidAmount("overflow in addition".to_string()))
    }

    /// Checked subtraction, fails instead of going below zero
    pub fn checked_sub(&self, other: Self) -> Result<Self> {
        self.0.checked_sub(other.0).map(Amount).ok_or_else(|| {
            RatioSwapError::InvalidAmount(format!("underflow: {} - {}", self.0, other.0))
        })
    }

    /// Checked multiplication by an integer factor
    pub fn checked_mul(&self, factor: u64) -> Result<Self> {
        self.0
            .checked_mul(u128::from(factor))
            .map(Amount)
            .ok_or_else(|| RatioSwapError::InvalidAmount("overflow in multiplication".to_string()))
    }

    /// Integer division truncating toward zero. The divisor is non-zero by type.
    pub fn div_floor(&self, divisor: std::num::NonZeroU64) -> Self {
        Amount(self.0 / u128::from(divisor.get()))
    }
}

impl From<u128> for Amount {
    fn from(units: u128) -> Self {
        Amount(units)
    }
}

impl From<u64> for Amount {
    fn from(units: u64) -> Self {
        Amount(u128::from(units))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
