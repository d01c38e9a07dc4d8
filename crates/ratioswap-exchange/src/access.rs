use ratioswap_types::AccountId;
use serde::{Deserialize, Serialize};

use crate::error::{ExchangeError, Result};

/// Single-administrator gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ownable {
    owner: AccountId,
}

impl Ownable {
    pub fn new(owner: AccountId) -> Self {
        Ownable { owner }
    }

    pub fn owner(&self) -> &AccountId {
        &self.owner
    }

    /// Reject any caller other than the current owner
    pub fn only_owner(&self, caller: &AccountId) -> Result<()> {
        if caller != &self.owner {
            tracing::warn!(%caller, owner = %self.owner, "rejected privileged call");
            return Err(ExchangeError::Unauthorized(caller.clone()));
        }
        Ok(())
    }

    /// Hand the gate to `new_owner`, returning the previous owner
    pub fn transfer_ownership(&mut self, caller: &AccountId, new_owner: AccountId) -> Result<AccountId> {
        self.only_owner(caller)?;
        Ok(std::mem::replace(&mut self.owner, new_owner))
    }
}
