use ratioswap_types::{AccountId, Amount, Direction, ExchangeRatio, OrderId};
use serde::{Deserialize, Serialize};

/// Record of a committed state change, appended in call order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExchangeEvent {
    Initialized {
        token_contract: AccountId,
        owner: AccountId,
        exchange_ratio: ExchangeRatio,
    },
    ExchangeRatioUpdated {
        previous: ExchangeRatio,
        current: ExchangeRatio,
    },
    TokenDeposited {
        from: AccountId,
        amount: Amount,
    },
    CurrencyDeposited {
        from: AccountId,
        amount: Amount,
    },
    /// Immediate settlement
    Swapped {
        user: AccountId,
        direction: Direction,
        amount_in: Amount,
        amount_out: Amount,
    },
    OrderCreated {
        order_id: OrderId,
        user: AccountId,
        direction: Direction,
        amount: Amount,
    },
    OrderExecuted {
        order_id: OrderId,
        user: AccountId,
        direction: Direction,
        payout: Amount,
    },
    OwnershipTransferred {
        previous: AccountId,
        current: AccountId,
    },
}
