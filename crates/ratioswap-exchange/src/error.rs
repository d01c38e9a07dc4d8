use ratioswap_types::{AccountId, Amount, AssetId, OrderId, RatioSwapError};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExchangeError>;

/// Errors that can occur during exchange operations
///
/// Any error aborts the whole call: ledger balances, exchange state and the
/// event log are left exactly as they were before it.
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("Unauthorized account: {0}")]
    Unauthorized(AccountId),

    #[error("Insufficient liquidity: {required} {asset} required, {available} available")]
    InsufficientLiquidity {
        asset: AssetId,
        required: Amount,
        available: Amount,
    },

    #[error("Invalid order {order_id}: {reason}")]
    InvalidOrder {
        order_id: OrderId,
        reason: InvalidOrderReason,
    },

    #[error("Transfer failed: {0}")]
    TransferFailure(#[source] RatioSwapError),

    #[error("Invalid exchange ratio: {0}")]
    InvalidRatio(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Exchange not initialized")]
    NotInitialized,

    #[error("Exchange already initialized")]
    AlreadyInitialized,

    #[error("Configuration error: {0}")]
    Config(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidOrderReason {
    NotFound,
    AlreadyExecuted,
}

impl fmt::Display for InvalidOrderReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidOrderReason::NotFound => write!(f, "order does not exist"),
            InvalidOrderReason::AlreadyExecuted => write!(f, "order already executed"),
        }
    }
}

impl From<RatioSwapError> for ExchangeError {
    fn from(err: RatioSwapError) -> Self {
        match err {
            RatioSwapError::InvalidRatio(msg) => ExchangeError::InvalidRatio(msg),
            RatioSwapError::InvalidAmount(msg) => ExchangeError::InvalidAmount(msg),
            RatioSwapError::OrderNotFound(order_id) => ExchangeError::InvalidOrder {
                order_id,
                reason: InvalidOrderReason::NotFound,
            },
            RatioSwapError::OrderAlreadyExecuted(order_id) => ExchangeError::InvalidOrder {
                order_id,
                reason: InvalidOrderReason::AlreadyExecuted,
            },
            err @ (RatioSwapError::InsufficientBalance { .. }
            | RatioSwapError::InsufficientAllowance { .. }) => ExchangeError::TransferFailure(err),
        }
    }
}
