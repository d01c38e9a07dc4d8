use ratioswap_types::{AccountId, Amount, Inventory, Result};
use std::collections::BTreeMap;

/// Fungible token contract consumed by the exchange
/// Mirrors the usual `transfer` / `transferFrom` / `approve` / `balanceOf` surface
pub trait TokenLedger {
    /// Create new tokens for an account (genesis and test funding)
    fn mint(&mut self, to: &AccountId, amount: Amount) -> Result<()>;

    /// Token balance of an account
    fn balance_of(&self, who: &AccountId) -> Amount;

    /// Remaining amount `spender` may move out of `owner`'s balance
    fn allowance(&self, owner: &AccountId, spender: &AccountId) -> Amount;

    /// Set (not add to) the allowance of `spender` over `owner`'s tokens
    fn approve(&mut self, owner: &AccountId, spender: &AccountId, amount: Amount) -> Result<()>;

    /// Move tokens out of the caller's own balance
    fn transfer(&mut self, from: &AccountId, to: &AccountId, amount: Amount) -> Result<()>;

    /// Move tokens on behalf of `from`, consuming `spender`'s allowance
    fn transfer_from(
        &mut self,
        spender: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<()>;
}

/// Native-currency value transfer provided by the host chain
pub trait NativeLedger {
    /// Native balance of an account
    fn native_balance(&self, who: &AccountId) -> Amount;

    /// Credit native currency from outside the system (genesis and test funding)
    fn credit_native(&mut self, who: &AccountId, amount: Amount) -> Result<()>;

    /// Move native currency between accounts
    fn transfer_native(&mut self, from: &AccountId, to: &AccountId, amount: Amount) -> Result<()>;
}

/// Both ledgers behind one handle, with checkpoint/restore so a failed call
/// can discard every side effect it produced
pub trait Ledger: TokenLedger + NativeLedger {
    /// Get a snapshot of all balances and allowances
    fn snapshot(&self) -> LedgerSnapshot;

    /// Restore from a snapshot
    fn restore(&mut self, snapshot: LedgerSnapshot);
}

/// Snapshot of ledger state for checkpoint/restore
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerSnapshot {
    pub accounts: BTreeMap<AccountId, Inventory>,
    pub allowances: BTreeMap<(AccountId, AccountId), Amount>,
}
