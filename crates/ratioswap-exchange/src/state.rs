use ratioswap_orders::OrderBook;
use ratioswap_types::{AccountId, Amount, AssetId, Direction, ExchangeRatio, OrderId};
use serde::{Deserialize, Serialize};

use crate::access::Ownable;
use crate::error::Result;

/// Current exchange figures, as reported to operators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemStatus {
    pub owner: AccountId,
    pub token_contract: AccountId,
    pub exchange_ratio: ExchangeRatio,
    pub token_liquidity: Amount,
    pub currency_liquidity: Amount,
    pub total_orders: usize,
    pub pending_orders: usize,
    pub next_order_id: OrderId,
}

/// Everything the exchange owns besides the ledgers it talks to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeState {
    pub access: Ownable,
    pub token_contract: AccountId,
    pub exchange_ratio: ExchangeRatio,
    /// Tokens the exchange holds for swapping
    pub token_liquidity: Amount,
    /// Native currency held by the exchange, kept equal to its native ledger balance
    pub currency_liquidity: Amount,
    pub orders: OrderBook,
}

impl ExchangeState {
    pub fn new(token_contract: AccountId, administrator: AccountId) -> Self {
        Self {
            access: Ownable::new(administrator),
            token_contract,
            exchange_ratio: ExchangeRatio::default(),
            token_liquidity: Amount::ZERO,
            currency_liquidity: Amount::ZERO,
            orders: OrderBook::new(),
        }
    }

    /// Pool that pays out `asset`
    pub fn liquidity(&self, asset: AssetId) -> Amount {
        match asset {
            AssetId::Token => self.token_liquidity,
            AssetId::Currency => self.currency_liquidity,
        }
    }

    pub fn credit(&mut self, asset: AssetId, amount: Amount) -> Result<()> {
        let pool = self.pool_mut(asset);
        *pool = pool.checked_add(amount)?;
        Ok(())
    }

    pub fn debit(&mut self, asset: AssetId, amount: Amount) -> Result<()> {
        let pool = self.pool_mut(asset);
        *pool = pool.checked_sub(amount)?;
        Ok(())
    }

    fn pool_mut(&mut self, asset: AssetId) -> &mut Amount {
        match asset {
            AssetId::Token => &mut self.token_liquidity,
            AssetId::Currency => &mut self.currency_liquidity,
        }
    }

    /// Amount of the receive asset owed for `amount` of the pay asset at the current ratio
    pub fn quote(&self, direction: Direction, amount: Amount) -> Result<Amount> {
        let payout = match direction {
            Direction::TokenToCurrency => self.exchange_ratio.token_to_currency(amount),
            Direction::CurrencyToToken => self.exchange_ratio.currency_to_token(amount)?,
        };
        Ok(payout)
    }

    pub fn get_status(&self) -> SystemStatus {
        SystemStatus {
            owner: self.access.owner().clone(),
            token_contract: self.token_contract.clone(),
            exchange_ratio: self.exchange_ratio,
            token_liquidity: self.token_liquidity,
            currency_liquidity: self.currency_liquidity,
            total_orders: self.orders.len(),
            pending_orders: self.orders.pending().count(),
            next_order_id: self.orders.next_id(),
        }
    }
}
