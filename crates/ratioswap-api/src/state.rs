use chrono::{DateTime, Utc};
use ratioswap_exchange::{Exchange, ExchangeConfig, Result};
use ratioswap_ledger::MemoryLedger;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Shared application state
///
/// One exchange behind one lock: requests are applied strictly one at a time.
#[derive(Clone)]
pub struct AppState {
    exchange: Arc<Mutex<Exchange<MemoryLedger>>>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(exchange: Exchange<MemoryLedger>) -> Self {
        AppState {
            exchange: Arc::new(Mutex::new(exchange)),
            started_at: Utc::now(),
        }
    }

    /// Bootstrap an in-memory exchange from config
    pub fn from_config(config: ExchangeConfig) -> Result<Self> {
        Ok(Self::new(Exchange::bootstrap(config, MemoryLedger::new())?))
    }

    /// Exclusive access to the exchange
    ///
    /// Operations never leave the exchange half-applied, so a poisoned lock
    /// still guards consistent state.
    pub fn exchange(&self) -> MutexGuard<'_, Exchange<MemoryLedger>> {
        self.exchange.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn uptime_seconds(&self) -> u64 {
        (Utc::now() - self.started_at).num_seconds().max(0) as u64
    }
}
