use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;

use crate::error::{RatioSwapError, Result};
use crate::Amount;

/// Ratio applied when an exchange is initialized
pub const DEFAULT_EXCHANGE_RATIO: u64 = 5;

/// Token units per one unit of native currency. Always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct ExchangeRatio(NonZeroU64);

impl ExchangeRatio {
    pub fn new(ratio: u64) -> Result<Self> {
        NonZeroU64::new(ratio).map(ExchangeRatio).ok_or_else(|| {
            RatioSwapError::InvalidRatio("ratio must be greater than zero".to_string())
        })
    }

    pub fn get(&self) -> u64 {
        self.0.get()
    }

    /// Currency owed for `tokens`, truncated toward zero
    pub fn token_to_currency(&self, tokens: Amount) -> Amount {
        tokens.div_floor(self.0)
    }

    /// Tokens owed for `currency`. Exact, but may overflow.
    pub fn currency_to_token(&self, currency: Amount) -> Result<Amount> {
        currency.checked_mul(self.0.get())
    }
}

const DEFAULT_RATIO: NonZeroU64 = match NonZeroU64::new(DEFAULT_EXCHANGE_RATIO) {
    Some(ratio) => ratio,
    None => panic!("default exchange ratio must be non-zero"),
};

impl Default for ExchangeRatio {
    fn default() -> Self {
        ExchangeRatio(DEFAULT_RATIO)
    }
}

impl TryFrom<u64> for ExchangeRatio {
    type Error = RatioSwapError;

    fn try_from(ratio: u64) -> Result<Self> {
        ExchangeRatio::new(ratio)
    }
}

impl TryFrom<i64> for ExchangeRatio {
    type Error = RatioSwapError;

    fn try_from(ratio: i64) -> Result<Self> {
        let ratio = u64::try_from(ratio).map_err(|_| {
            RatioSwapError::InvalidRatio(format!("ratio must be positive, got {}", ratio))
        })?;
        ExchangeRatio::new(ratio)
    }
}

impl From<ExchangeRatio> for u64 {
    fn from(ratio: ExchangeRatio) -> Self {
        ratio.get()
    }
}

impl fmt::Display for ExchangeRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:1", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ratio() {
        assert_eq!(ExchangeRatio::default().get(), 5);
    }

    #[test]
    fn test_rejects_zero_and_negative() {
        assert!(matches!(ExchangeRatio::new(0), Err(RatioSwapError::InvalidRatio(_))));
        assert!(matches!(ExchangeRatio::try_from(-3i64), Err(RatioSwapError::InvalidRatio(_))));
        assert_eq!(ExchangeRatio::try_from(10i64).unwrap().get(), 10);
    }

    #[test]
    fn test_conversions() {
        let ratio = ExchangeRatio::default();
        assert_eq!(ratio.token_to_currency(Amount::new(50)), Amount::new(10));
        assert_eq!(ratio.token_to_currency(Amount::new(54)), Amount::new(10));
        assert_eq!(ratio.currency_to_token(Amount::new(10)).unwrap(), Amount::new(50));
    }

    #[test]
    fn test_currency_to_token_overflow() {
        let ratio = ExchangeRatio::new(u64::MAX).unwrap();
        assert!(ratio.currency_to_token(Amount::new(u128::MAX)).is_err());
    }

    #[test]
    fn test_deserialize_rejects_zero() {
        assert!(serde_json::from_str::<ExchangeRatio>("0").is_err());
        assert_eq!(serde_json::from_str::<ExchangeRatio>("7").unwrap().get(), 7);
    }
}
