use serde::{Deserialize, Serialize};
use std::fmt;

/// The two assets held by the exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetId {
    /// Fungible token managed by the token ledger
    Token,
    /// Native currency of the host chain
    Currency,
}

impl AssetId {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetId::Token => "token",
            AssetId::Currency => "currency",
        }
    }

    /// The opposite side of the pair
    pub fn counterpart(&self) -> AssetId {
        match self {
            AssetId::Token => AssetId::Currency,
            AssetId::Currency => AssetId::Token,
        }
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
