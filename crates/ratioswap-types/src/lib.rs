mod account;
mod amount;
mod asset;
mod error;
mod inventory;
mod order;
mod ratio;

pub use account::AccountId;
pub use amount::Amount;
pub use asset::AssetId;
pub use error::{RatioSwapError, Result};
pub use inventory::Inventory;
pub use order::{Direction, Order, OrderId};
pub use ratio::{ExchangeRatio, DEFAULT_EXCHANGE_RATIO};
