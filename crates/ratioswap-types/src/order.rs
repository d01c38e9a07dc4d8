use crate::{AccountId, Amount, AssetId};
use serde::{Deserialize, Serialize};

/// Order identifier, assigned sequentially from 1
pub type OrderId = u64;

/// Which way a swap goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// User pays token, is owed native currency
    TokenToCurrency,
    /// User pays native currency, is owed token
    CurrencyToToken,
}

impl Direction {
    /// Asset escrowed from the user
    pub fn pay_asset(&self) -> AssetId {
        match self {
            Direction::TokenToCurrency => AssetId::Token,
            Direction::CurrencyToToken => AssetId::Currency,
        }
    }

    /// Asset owed to the user
    pub fn receive_asset(&self) -> AssetId {
        self.pay_asset().counterpart()
    }
}

/// A pending swap whose offered asset is already held in escrow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user: AccountId,
    /// Units of the pay asset
    pub amount: Amount,
    pub direction: Direction,
    pub executed: bool,
}

impl Order {
    pub fn new(id: OrderId, user: AccountId, amount: Amount, direction: Direction) -> Self {
        Order {
            id,
            user,
            amount,
            direction,
            executed: false,
        }
    }

    pub fn is_pending(&self) -> bool {
        !self.executed
    }
}
