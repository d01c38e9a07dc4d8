mod access;
mod config;
mod error;
mod events;
mod exchange;
mod state;

pub use access::Ownable;
pub use config::{ExchangeConfig, GenesisAccount};
pub use error::{ExchangeError, InvalidOrderReason, Result};
pub use events::ExchangeEvent;
pub use exchange::{CallContext, Exchange, SwapOutcome};
pub use state::{ExchangeState, SystemStatus};
