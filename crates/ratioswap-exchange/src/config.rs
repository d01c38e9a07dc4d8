use ratioswap_types::{AccountId, Amount};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ExchangeError, Result};

/// Configuration for the exchange and its HTTP front end
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeConfig {
    /// Identity under which the exchange holds token and currency custody
    pub exchange_account: AccountId,

    /// Address of the token contract the exchange trades against
    pub token_contract: AccountId,

    /// Initial administrator
    pub administrator: AccountId,

    /// Host for HTTP API server
    pub api_host: String,

    /// Port for HTTP API server
    pub api_port: u16,

    /// Balances credited to accounts before the exchange is initialized
    pub genesis: Vec<GenesisAccount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisAccount {
    pub account: AccountId,
    #[serde(default)]
    pub token: Amount,
    #[serde(default)]
    pub currency: Amount,
}

impl ExchangeConfig {
    /// Parse a JSON config; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ExchangeConfig = serde_json::from_str(json)
            .map_err(|e| ExchangeError::Config(format!("invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            ExchangeError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.exchange_account.as_str().is_empty() {
            return Err(ExchangeError::Config("exchange_account must not be empty".to_string()));
        }
        if self.exchange_account == self.administrator {
            return Err(ExchangeError::Config(
                "administrator must differ from the exchange custody account".to_string(),
            ));
        }
        if self.exchange_account == self.token_contract {
            return Err(ExchangeError::Config(
                "token_contract must differ from the exchange custody account".to_string(),
            ));
        }
        Ok(())
    }

    /// Socket address string for the API listener
    pub fn api_addr(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            exchange_account: AccountId::new("exchange"),
            token_contract: AccountId::new("abc-token"),
            administrator: AccountId::new("admin"),
            api_host: "127.0.0.1".to_string(),
            api_port: 3000,
            genesis: vec![GenesisAccount {
                account: AccountId::new("admin"),
                token: Amount::new(1_000_000),
                currency: Amount::new(100_000),
            }],
        }
    }
}
