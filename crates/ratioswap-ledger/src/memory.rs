use ratioswap_types::{AccountId, Amount, AssetId, Inventory, RatioSwapError, Result};
use std::collections::BTreeMap;

use crate::ledger::{Ledger, LedgerSnapshot, NativeLedger, TokenLedger};

/// In-memory token and native ledger
/// Suitable for testing and for running the exchange without a live chain
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    accounts: BTreeMap<AccountId, Inventory>,
    allowances: BTreeMap<(AccountId, AccountId), Amount>,
}

impl MemoryLedger {
    /// Create a new empty in-memory ledger
    pub fn new() -> Self {
        MemoryLedger::default()
    }

    /// Get mutable reference to account inventory (creates if not exists)
    fn get_or_create_account_mut(&mut self, account: &AccountId) -> &mut Inventory {
        self.accounts.entry(account.clone()).or_default()
    }

    fn balance(&self, account: &AccountId, asset: AssetId) -> Amount {
        self.accounts
            .get(account)
            .map(|inv| inv.get(asset))
            .unwrap_or(Amount::ZERO)
    }

    fn credit(&mut self, account: &AccountId, asset: AssetId, amount: Amount) -> Result<()> {
        self.get_or_create_account_mut(account).add(asset, amount)
    }

    /// Debit-then-credit move of one asset. Checks everything before mutating.
    fn move_asset(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        asset: AssetId,
        amount: Amount,
    ) -> Result<()> {
        if amount.is_zero() {
            return Ok(()); // No-op for zero transfers
        }

        if self.balance(from, asset) < amount {
            return Err(RatioSwapError::InsufficientBalance {
                account: from.to_string(),
                asset: asset.to_string(),
            });
        }
        // Receiver overflow must be detected before the debit lands
        if from != to {
            self.balance(to, asset).checked_add(amount)?;
        }

        self.get_or_create_account_mut(from).sub(asset, amount)?;
        self.credit(to, asset, amount)
    }
}

impl TokenLedger for MemoryLedger {
    fn mint(&mut self, to: &AccountId, amount: Amount) -> Result<()> {
        self.credit(to, AssetId::Token, amount)
    }

    fn balance_of(&self, who: &AccountId) -> Amount {
        self.balance(who, AssetId::Token)
    }

    fn allowance(&self, owner: &AccountId, spender: &AccountId) -> Amount {
        self.allowances
            .get(&(owner.clone(), spender.clone()))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn approve(&mut self, owner: &AccountId, spender: &AccountId, amount: Amount) -> Result<()> {
        let key = (owner.clone(), spender.clone());
        if amount.is_zero() {
            self.allowances.remove(&key);
        } else {
            self.allowances.insert(key, amount);
        }
        tracing::debug!(%owner, %spender, %amount, "token allowance set");
        Ok(())
    }

    fn transfer(&mut self, from: &AccountId, to: &AccountId, amount: Amount) -> Result<()> {
        self.move_asset(from, to, AssetId::Token, amount)
    }

    fn transfer_from(
        &mut self,
        spender: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<()> {
        let allowed = self.allowance(from, spender);
        if allowed < amount {
            return Err(RatioSwapError::InsufficientAllowance {
                owner: from.to_string(),
                spender: spender.to_string(),
            });
        }

        self.move_asset(from, to, AssetId::Token, amount)?;

        let remaining = allowed.checked_sub(amount)?;
        self.approve(from, spender, remaining)
    }
}

impl NativeLedger for MemoryLedger {
    fn native_balance(&self, who: &AccountId) -> Amount {
        self.balance(who, AssetId::Currency)
    }

    fn credit_native(&mut self, who: &AccountId, amount: Amount) -> Result<()> {
        self.credit(who, AssetId::Currency, amount)
    }

    fn transfer_native(&mut self, from: &AccountId, to: &AccountId, amount: Amount) -> Result<()> {
        self.move_asset(from, to, AssetId::Currency, amount)
    }
}

impl Ledger for MemoryLedger {
    fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            accounts: self.accounts.clone(),
            allowances: self.allowances.clone(),
        }
    }

    fn restore(&mut self, snapshot: LedgerSnapshot) {
        self.accounts = snapshot.accounts;
        self.allowances = snapshot.allowances;
    }
}
