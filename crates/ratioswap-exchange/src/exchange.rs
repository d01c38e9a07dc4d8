use crate::{ExchangeConfig, ExchangeError, ExchangeEvent, ExchangeState, Result, SystemStatus};
use ratioswap_ledger::{Ledger, NativeLedger, TokenLedger};
use ratioswap_types::{AccountId, Amount, AssetId, Direction, ExchangeRatio, Order, OrderId};
use serde::{Deserialize, Serialize};

/// Who is calling and how much native currency is attached to the call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallContext {
    pub caller: AccountId,
    pub value: Amount,
}

impl CallContext {
    /// A call without attached value
    pub fn new(caller: impl Into<AccountId>) -> Self {
        Self {
            caller: caller.into(),
            value: Amount::ZERO,
        }
    }

    /// A call carrying `value` native currency
    pub fn with_value(caller: impl Into<AccountId>, value: Amount) -> Self {
        Self {
            caller: caller.into(),
            value,
        }
    }
}

/// Result of a swap request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SwapOutcome {
    /// Paid out within the call
    Settled { payout: Amount },
    /// Receiving pool was short; the offered asset stays in escrow under this order
    Pending { order_id: OrderId },
}

/// Token/native-currency exchange at an administrator-set ratio
///
/// Created uninitialized; `initialize` must run exactly once before any
/// other operation. Every state-changing operation is all-or-nothing: the
/// ledger and the exchange state are checkpointed on entry and restored if
/// any step fails.
pub struct Exchange<L> {
    config: ExchangeConfig,
    account: AccountId,
    ledger: L,
    state: Option<ExchangeState>,
    events: Vec<ExchangeEvent>,
}

impl<L: Ledger> Exchange<L> {
    /// Create an exchange bound to `ledger` that has not been initialized yet
    pub fn new(config: ExchangeConfig, ledger: L) -> Self {
        let account = config.exchange_account.clone();
        Self {
            config,
            account,
            ledger,
            state: None,
            events: Vec::new(),
        }
    }

    /// Credit the configured genesis balances and initialize with the
    /// configured token contract and administrator
    pub fn bootstrap(config: ExchangeConfig, mut ledger: L) -> Result<Self> {
        config.validate()?;

        for genesis in &config.genesis {
            ledger
                .mint(&genesis.account, genesis.token)
                .and_then(|_| ledger.credit_native(&genesis.account, genesis.currency))
                .map_err(|e| {
                    ExchangeError::Config(format!("genesis for {}: {}", genesis.account, e))
                })?;
            tracing::debug!(
                account = %genesis.account,
                token = %genesis.token,
                currency = %genesis.currency,
                "genesis balance credited"
            );
        }

        let token_contract = config.token_contract.clone();
        let administrator = config.administrator.clone();
        let mut exchange = Self::new(config, ledger);
        exchange.initialize(token_contract, administrator)?;
        Ok(exchange)
    }

    /// One-time setup: ratio 5, empty pools, order ids from 1
    pub fn initialize(&mut self, token_contract: AccountId, administrator: AccountId) -> Result<()> {
        if self.state.is_some() {
            return Err(ExchangeError::AlreadyInitialized);
        }

        let state = ExchangeState::new(token_contract.clone(), administrator.clone());
        let exchange_ratio = state.exchange_ratio;
        self.state = Some(state);
        self.events.push(ExchangeEvent::Initialized {
            token_contract: token_contract.clone(),
            owner: administrator.clone(),
            exchange_ratio,
        });

        tracing::info!(%token_contract, %administrator, %exchange_ratio, "exchange initialized");
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    pub fn config(&self) -> &ExchangeConfig {
        &self.config
    }

    /// The ledgers the exchange settles against
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Direct ledger access for callers acting outside the exchange
    /// (approvals, funding)
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    /// Fail with `Unauthorized` unless `caller` is the current administrator
    pub fn authorize(&self, caller: &AccountId) -> Result<()> {
        self.state()?.access.only_owner(caller)
    }

    fn state(&self) -> Result<&ExchangeState> {
        self.state.as_ref().ok_or(ExchangeError::NotInitialized)
    }

    /// Run `op` so that either all of its effects land or none do
    fn atomically<T>(&mut self, op: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let ledger_checkpoint = self.ledger.snapshot();
        let state_checkpoint = self.state.clone();
        let events_len = self.events.len();

        match op(self) {
            Ok(value) => Ok(value),
            Err(err) => {
                self.ledger.restore(ledger_checkpoint);
                self.state = state_checkpoint;
                self.events.truncate(events_len);
                tracing::debug!(error = %err, "call reverted");
                Err(err)
            }
        }
    }

    /// Replace the exchange ratio (administrator only)
    pub fn set_exchange_ratio(&mut self, caller: &AccountId, new_ratio: u64) -> Result<()> {
        self.atomically(|ex| {
            let state = ex.state.as_mut().ok_or(ExchangeError::NotInitialized)?;
            state.access.only_owner(caller)?;

            let current = ExchangeRatio::new(new_ratio)?;
            let previous = std::mem::replace(&mut state.exchange_ratio, current);
            ex.events.push(ExchangeEvent::ExchangeRatioUpdated { previous, current });

            tracing::info!(%previous, %current, "exchange ratio updated");
            Ok(())
        })
    }

    /// Pull `amount` tokens from the administrator into the pool
    ///
    /// The administrator must have approved the exchange account beforehand.
    pub fn deposit_token(&mut self, caller: &AccountId, amount: Amount) -> Result<()> {
        self.atomically(|ex| {
            let state = ex.state.as_mut().ok_or(ExchangeError::NotInitialized)?;
            state.access.only_owner(caller)?;

            ex.ledger
                .transfer_from(&ex.account, caller, &ex.account, amount)
                .map_err(ExchangeError::TransferFailure)?;
            state.credit(AssetId::Token, amount)?;
            ex.events.push(ExchangeEvent::TokenDeposited {
                from: caller.clone(),
                amount,
            });

            tracing::info!(%amount, token_liquidity = %state.token_liquidity, "token deposited");
            Ok(())
        })
    }

    /// Add the call's attached native currency to the pool
    pub fn deposit_currency(&mut self, call: &CallContext) -> Result<()> {
        self.atomically(|ex| {
            let state = ex.state.as_mut().ok_or(ExchangeError::NotInitialized)?;
            state.access.only_owner(&call.caller)?;
            attach_value(&mut ex.ledger, &ex.account, state, call)?;

            ex.events.push(ExchangeEvent::CurrencyDeposited {
                from: call.caller.clone(),
                amount: call.value,
            });

            tracing::info!(amount = %call.value, currency_liquidity = %state.currency_liquidity, "currency deposited");
            Ok(())
        })
    }

    /// Swap `amount` tokens for native currency
    ///
    /// The tokens are escrowed first, unconditionally. If the currency pool
    /// covers `amount / ratio` it is paid now, otherwise a pending order is
    /// recorded.
    pub fn exchange_token_to_currency(
        &mut self,
        caller: &AccountId,
        amount: Amount,
    ) -> Result<SwapOutcome> {
        self.atomically(|ex| {
            let state = ex.state.as_mut().ok_or(ExchangeError::NotInitialized)?;

            ex.ledger
                .transfer_from(&ex.account, caller, &ex.account, amount)
                .map_err(ExchangeError::TransferFailure)?;
            state.credit(AssetId::Token, amount)?;

            settle_or_defer(
                &mut ex.ledger,
                &ex.account,
                state,
                &mut ex.events,
                caller,
                Direction::TokenToCurrency,
                amount,
            )
        })
    }

    /// Swap the call's attached native currency for tokens
    ///
    /// The attached value is held by the exchange from the start of the
    /// call. If the token pool covers `value * ratio` it is paid now,
    /// otherwise a pending order is recorded.
    pub fn exchange_currency_to_token(&mut self, call: &CallContext) -> Result<SwapOutcome> {
        self.atomically(|ex| {
            let state = ex.state.as_mut().ok_or(ExchangeError::NotInitialized)?;
            attach_value(&mut ex.ledger, &ex.account, state, call)?;

            settle_or_defer(
                &mut ex.ledger,
                &ex.account,
                state,
                &mut ex.events,
                &call.caller,
                Direction::CurrencyToToken,
                call.value,
            )
        })
    }

    /// Pay out a pending order at the current ratio (administrator only)
    ///
    /// Fails with `InvalidOrder` for unknown or already executed orders and
    /// with `InsufficientLiquidity` when the paying pool is still short.
    /// Returns the amount paid to the order's user.
    pub fn execute_pending_order(
        &mut self,
        caller: &AccountId,
        order_id: OrderId,
    ) -> Result<Amount> {
        self.atomically(|ex| {
            let state = ex.state.as_mut().ok_or(ExchangeError::NotInitialized)?;
            state.access.only_owner(caller)?;

            let order = state.orders.get_executable(order_id)?.clone();
            let payout = state.quote(order.direction, order.amount)?;
            let receive = order.direction.receive_asset();

            let available = state.liquidity(receive);
            if available < payout {
                tracing::warn!(order_id, %payout, %available, asset = %receive, "pending order still short of liquidity");
                return Err(ExchangeError::InsufficientLiquidity {
                    asset: receive,
                    required: payout,
                    available,
                });
            }

            pay(&mut ex.ledger, &ex.account, state, &order.user, receive, payout)?;
            state.orders.mark_executed(order_id)?;
            ex.events.push(ExchangeEvent::OrderExecuted {
                order_id,
                user: order.user.clone(),
                direction: order.direction,
                payout,
            });

            tracing::info!(order_id, user = %order.user, %payout, asset = %receive, "pending order executed");
            Ok(payout)
        })
    }

    /// Hand administration to `new_owner` (administrator only)
    pub fn transfer_ownership(&mut self, caller: &AccountId, new_owner: AccountId) -> Result<()> {
        self.atomically(|ex| {
            let state = ex.state.as_mut().ok_or(ExchangeError::NotInitialized)?;
            let previous = state.access.transfer_ownership(caller, new_owner.clone())?;
            ex.events.push(ExchangeEvent::OwnershipTransferred {
                previous: previous.clone(),
                current: new_owner.clone(),
            });

            tracing::info!(%previous, current = %new_owner, "ownership transferred");
            Ok(())
        })
    }

    /// Stored order, executed or not
    pub fn get_pending_order(&self, order_id: OrderId) -> Result<&Order> {
        Ok(self.state()?.orders.get(order_id)?)
    }

    /// Orders still awaiting execution, ascending by id
    pub fn pending_orders(&self) -> Result<Vec<&Order>> {
        Ok(self.state()?.orders.pending().collect())
    }

    /// Every order ever created, ascending by id
    pub fn orders(&self) -> Result<Vec<&Order>> {
        Ok(self.state()?.orders.iter().collect())
    }

    /// Token pool size
    pub fn token_balance(&self) -> Result<Amount> {
        Ok(self.state()?.token_liquidity)
    }

    /// Native currency held by the exchange
    pub fn currency_balance(&self) -> Result<Amount> {
        Ok(self.state()?.currency_liquidity)
    }

    pub fn exchange_ratio(&self) -> Result<ExchangeRatio> {
        Ok(self.state()?.exchange_ratio)
    }

    pub fn owner(&self) -> Result<&AccountId> {
        Ok(self.state()?.access.owner())
    }

    pub fn token_contract(&self) -> Result<&AccountId> {
        Ok(&self.state()?.token_contract)
    }

    /// Custody account in both ledgers
    pub fn exchange_account(&self) -> &AccountId {
        &self.account
    }

    pub fn next_order_id(&self) -> Result<OrderId> {
        Ok(self.state()?.orders.next_id())
    }

    pub fn events(&self) -> &[ExchangeEvent] {
        &self.events
    }

    pub fn get_status(&self) -> Result<SystemStatus> {
        Ok(self.state()?.get_status())
    }
}

/// Move the call's attached native value into custody
fn attach_value<L: Ledger>(
    ledger: &mut L,
    custody: &AccountId,
    state: &mut ExchangeState,
    call: &CallContext,
) -> Result<()> {
    ledger
        .transfer_native(&call.caller, custody, call.value)
        .map_err(ExchangeError::TransferFailure)?;
    state.credit(AssetId::Currency, call.value)
}

/// Send `payout` of `asset` from custody to `to` and shrink the matching pool
fn pay<L: Ledger>(
    ledger: &mut L,
    custody: &AccountId,
    state: &mut ExchangeState,
    to: &AccountId,
    asset: AssetId,
    payout: Amount,
) -> Result<()> {
    let sent = match asset {
        AssetId::Token => TokenLedger::transfer(ledger, custody, to, payout),
        AssetId::Currency => ledger.transfer_native(custody, to, payout),
    };
    sent.map_err(ExchangeError::TransferFailure)?;
    state.debit(asset, payout)
}

/// Second half of a swap, after the offered asset is already in custody
fn settle_or_defer<L: Ledger>(
    ledger: &mut L,
    custody: &AccountId,
    state: &mut ExchangeState,
    events: &mut Vec<ExchangeEvent>,
    user: &AccountId,
    direction: Direction,
    amount: Amount,
) -> Result<SwapOutcome> {
    let payout = state.quote(direction, amount)?;
    let receive = direction.receive_asset();
    let available = state.liquidity(receive);

    if available >= payout {
        pay(ledger, custody, state, user, receive, payout)?;
        events.push(ExchangeEvent::Swapped {
            user: user.clone(),
            direction,
            amount_in: amount,
            amount_out: payout,
        });

        tracing::info!(%user, ?direction, %amount, %payout, "swap settled");
        return Ok(SwapOutcome::Settled { payout });
    }

    let order_id = state.orders.create(user.clone(), amount, direction);
    events.push(ExchangeEvent::OrderCreated {
        order_id,
        user: user.clone(),
        direction,
        amount,
    });

    tracing::info!(order_id, %user, ?direction, %amount, %payout, %available, "swap deferred to pending order");
    Ok(SwapOutcome::Pending { order_id })
}
