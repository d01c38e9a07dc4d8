use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RatioSwapError {
    #[error("Insufficient balance: account={account}, asset={asset}")]
    InsufficientBalance { account: String, asset: String },

    #[error("Insufficient allowance: owner={owner}, spender={spender}")]
    InsufficientAllowance { owner: String, spender: String },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid exchange ratio: {0}")]
    InvalidRatio(String),

    #[error("Order not found: {0}")]
    OrderNotFound(u64),

    #[error("Order already executed: {0}")]
    OrderAlreadyExecuted(u64),
}

pub type Result<T> = std::result::Result<T, RatioSwapError>;
