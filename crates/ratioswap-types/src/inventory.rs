use crate::{Amount, AssetId, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Balances of one account across both assets
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Inventory {
    pub units: BTreeMap<AssetId, Amount>,
}

impl Inventory {
    /// Create a new empty inventory
    pub fn new() -> Self {
        Inventory {
            units: BTreeMap::new(),
        }
    }

    /// Get balance for an asset (returns 0 if not present)
    pub fn get(&self, asset: AssetId) -> Amount {
        self.units.get(&asset).copied().unwrap_or(Amount::ZERO)
    }

    /// Set balance for an asset
    pub fn set(&mut self, asset: AssetId, amount: Amount) {
        if amount.is_zero() {
            self.units.remove(&asset);
        } else {
            self.units.insert(asset, amount);
        }
    }

    /// Add to balance for an asset
    pub fn add(&mut self, asset: AssetId, delta: Amount) -> Result<()> {
        let new_amount = self.get(asset).checked_add(delta)?;
        self.set(asset, new_amount);
        Ok(())
    }

    /// Subtract from balance for an asset
    pub fn sub(&mut self, asset: AssetId, delta: Amount) -> Result<()> {
        let new_amount = self.get(asset).checked_sub(delta)?;
        self.set(asset, new_amount);
        Ok(())
    }
}
