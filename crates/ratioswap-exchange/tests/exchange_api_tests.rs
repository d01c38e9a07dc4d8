use proptest::prelude::*;
use ratioswap_exchange::{
    CallContext, Exchange, ExchangeConfig, ExchangeError, ExchangeEvent, InvalidOrderReason,
    SwapOutcome,
};
use ratioswap_ledger::{MemoryLedger, NativeLedger, TokenLedger};
use ratioswap_types::{AccountId, Amount, Direction};

fn admin() -> AccountId {
    AccountId::new("admin")
}

fn user1() -> AccountId {
    AccountId::new("user1")
}

fn amount(units: u128) -> Amount {
    Amount::new(units)
}

/// Initialized exchange; admin holds 1_000_000 token and 100_000 currency,
/// user1 holds 1000 token and 1000 currency
fn setup() -> Exchange<MemoryLedger> {
    let mut exchange = Exchange::new(ExchangeConfig::default(), MemoryLedger::new());
    exchange
        .initialize(AccountId::new("abc-token"), admin())
        .unwrap();

    let ledger = exchange.ledger_mut();
    ledger.mint(&admin(), amount(1_000_000)).unwrap();
    ledger.credit_native(&admin(), amount(100_000)).unwrap();
    ledger.mint(&user1(), amount(1000)).unwrap();
    ledger.credit_native(&user1(), amount(1000)).unwrap();
    exchange
}

fn approve(exchange: &mut Exchange<MemoryLedger>, owner: &AccountId, units: u128) {
    let spender = exchange.exchange_account().clone();
    exchange
        .ledger_mut()
        .approve(owner, &spender, amount(units))
        .unwrap();
}

/// Admin deposits 1000 token and 100 currency
fn provision(exchange: &mut Exchange<MemoryLedger>) {
    approve(exchange, &admin(), 1000);
    exchange.deposit_token(&admin(), amount(1000)).unwrap();
    exchange
        .deposit_currency(&CallContext::with_value("admin", amount(100)))
        .unwrap();
}

fn assert_currency_mirror(exchange: &Exchange<MemoryLedger>) {
    let held = exchange
        .ledger()
        .native_balance(exchange.exchange_account());
    assert_eq!(exchange.currency_balance().unwrap(), held);
}

#[test]
fn test_admin_deposits() {
    let mut exchange = setup();
    provision(&mut exchange);

    assert_eq!(exchange.token_balance().unwrap(), amount(1000));
    assert_eq!(exchange.currency_balance().unwrap(), amount(100));
    assert_eq!(
        exchange.ledger().balance_of(exchange.exchange_account()),
        amount(1000)
    );
    assert_currency_mirror(&exchange);
}

#[test]
fn test_token_deposit_without_allowance_fails() {
    let mut exchange = setup();

    let result = exchange.deposit_token(&admin(), amount(100));
    assert!(matches!(result, Err(ExchangeError::TransferFailure(_))));
    assert_eq!(exchange.token_balance().unwrap(), Amount::ZERO);
    assert_eq!(exchange.ledger().balance_of(&admin()), amount(1_000_000));
}

#[test]
fn test_scenario_token_to_currency_settles_immediately() {
    let mut exchange = setup();
    provision(&mut exchange);

    approve(&mut exchange, &user1(), 50);
    let outcome = exchange
        .exchange_token_to_currency(&user1(), amount(50))
        .unwrap();

    assert_eq!(outcome, SwapOutcome::Settled { payout: amount(10) });
    assert_eq!(exchange.token_balance().unwrap(), amount(1050));
    assert_eq!(exchange.currency_balance().unwrap(), amount(90));
    assert_eq!(exchange.ledger().native_balance(&user1()), amount(1010));
    assert_eq!(exchange.ledger().balance_of(&user1()), amount(950));
    assert_eq!(exchange.next_order_id().unwrap(), 1);
    assert_currency_mirror(&exchange);
}

#[test]
fn test_scenario_currency_to_token_settles_immediately() {
    let mut exchange = setup();
    provision(&mut exchange);

    let outcome = exchange
        .exchange_currency_to_token(&CallContext::with_value("user1", amount(10)))
        .unwrap();

    assert_eq!(outcome, SwapOutcome::Settled { payout: amount(50) });
    assert_eq!(exchange.token_balance().unwrap(), amount(950));
    assert_eq!(exchange.currency_balance().unwrap(), amount(110));
    assert_eq!(exchange.ledger().balance_of(&user1()), amount(1050));
    assert_eq!(exchange.ledger().native_balance(&user1()), amount(990));
    assert_currency_mirror(&exchange);
}

#[test]
fn test_scenario_pending_order_lifecycle() {
    let mut exchange = setup();
    provision(&mut exchange);

    // 1000 token needs 200 currency, only 100 held
    approve(&mut exchange, &user1(), 1000);
    let outcome = exchange
        .exchange_token_to_currency(&user1(), amount(1000))
        .unwrap();
    assert_eq!(outcome, SwapOutcome::Pending { order_id: 1 });

    let order = exchange.get_pending_order(1).unwrap();
    assert_eq!(order.user, user1());
    assert_eq!(order.amount, amount(1000));
    assert_eq!(order.direction, Direction::TokenToCurrency);
    assert!(!order.executed);

    // Tokens escrowed, nothing paid
    assert_eq!(exchange.token_balance().unwrap(), amount(2000));
    assert_eq!(exchange.currency_balance().unwrap(), amount(100));
    assert_eq!(exchange.ledger().balance_of(&user1()), Amount::ZERO);
    assert_eq!(exchange.ledger().native_balance(&user1()), amount(1000));

    // Replenish and execute
    exchange
        .deposit_currency(&CallContext::with_value("admin", amount(200)))
        .unwrap();
    let payout = exchange.execute_pending_order(&admin(), 1).unwrap();

    assert_eq!(payout, amount(200));
    assert!(exchange.get_pending_order(1).unwrap().executed);
    assert_eq!(exchange.ledger().native_balance(&user1()), amount(1200));
    assert_eq!(exchange.currency_balance().unwrap(), amount(100));
    assert!(exchange.pending_orders().unwrap().is_empty());
    assert_currency_mirror(&exchange);

    // No double execution
    let again = exchange.execute_pending_order(&admin(), 1);
    assert!(matches!(
        again,
        Err(ExchangeError::InvalidOrder {
            order_id: 1,
            reason: InvalidOrderReason::AlreadyExecuted
        })
    ));
    assert_eq!(exchange.ledger().native_balance(&user1()), amount(1200));
}

#[test]
fn test_scenario_non_admin_cannot_set_ratio() {
    let mut exchange = setup();

    let result = exchange.set_exchange_ratio(&user1(), 10);
    assert!(matches!(result, Err(ExchangeError::Unauthorized(ref who)) if *who == user1()));
    assert_eq!(exchange.exchange_ratio().unwrap().get(), 5);

    exchange.set_exchange_ratio(&admin(), 10).unwrap();
    assert_eq!(exchange.exchange_ratio().unwrap().get(), 10);
}

#[test]
fn test_privileged_operations_reject_users() {
    let mut exchange = setup();
    provision(&mut exchange);
    approve(&mut exchange, &user1(), 1000);
    exchange
        .exchange_token_to_currency(&user1(), amount(1000))
        .unwrap();
    let events_before = exchange.events().len();

    assert!(matches!(
        exchange.deposit_token(&user1(), amount(1)),
        Err(ExchangeError::Unauthorized(_))
    ));
    assert!(matches!(
        exchange.deposit_currency(&CallContext::with_value("user1", amount(1))),
        Err(ExchangeError::Unauthorized(_))
    ));
    assert!(matches!(
        exchange.execute_pending_order(&user1(), 1),
        Err(ExchangeError::Unauthorized(_))
    ));
    assert!(matches!(
        exchange.transfer_ownership(&user1(), user1()),
        Err(ExchangeError::Unauthorized(_))
    ));

    assert_eq!(exchange.events().len(), events_before);
    assert_eq!(exchange.ledger().native_balance(&user1()), amount(1000));
    assert!(!exchange.get_pending_order(1).unwrap().executed);
}

#[test]
fn test_execute_unknown_order() {
    let mut exchange = setup();

    let result = exchange.execute_pending_order(&admin(), 7);
    assert!(matches!(
        result,
        Err(ExchangeError::InvalidOrder {
            order_id: 7,
            reason: InvalidOrderReason::NotFound
        })
    ));
    assert!(matches!(
        exchange.get_pending_order(0),
        Err(ExchangeError::InvalidOrder { .. })
    ));
}

#[test]
fn test_execute_without_liquidity_changes_nothing() {
    let mut exchange = setup();
    provision(&mut exchange);
    approve(&mut exchange, &user1(), 1000);
    exchange
        .exchange_token_to_currency(&user1(), amount(1000))
        .unwrap();

    let result = exchange.execute_pending_order(&admin(), 1);
    assert!(matches!(
        result,
        Err(ExchangeError::InsufficientLiquidity { required, available, .. })
            if required == amount(200) && available == amount(100)
    ));
    assert!(!exchange.get_pending_order(1).unwrap().executed);
    assert_eq!(exchange.currency_balance().unwrap(), amount(100));
    assert_eq!(exchange.ledger().native_balance(&user1()), amount(1000));
}

#[test]
fn test_currency_to_token_pending_order() {
    let mut exchange = setup();

    // Empty token pool: 20 currency would need 100 token
    let outcome = exchange
        .exchange_currency_to_token(&CallContext::with_value("user1", amount(20)))
        .unwrap();
    assert_eq!(outcome, SwapOutcome::Pending { order_id: 1 });
    assert_eq!(exchange.currency_balance().unwrap(), amount(20));
    assert_eq!(exchange.ledger().native_balance(&user1()), amount(980));

    let order = exchange.get_pending_order(1).unwrap();
    assert_eq!(order.direction, Direction::CurrencyToToken);
    assert_eq!(order.amount, amount(20));

    approve(&mut exchange, &admin(), 100);
    exchange.deposit_token(&admin(), amount(100)).unwrap();
    let payout = exchange.execute_pending_order(&admin(), 1).unwrap();

    assert_eq!(payout, amount(100));
    assert_eq!(exchange.token_balance().unwrap(), Amount::ZERO);
    assert_eq!(exchange.ledger().balance_of(&user1()), amount(1100));
}

#[test]
fn test_pending_order_paid_at_ratio_current_at_execution() {
    let mut exchange = setup();
    provision(&mut exchange);
    approve(&mut exchange, &user1(), 1000);
    exchange
        .exchange_token_to_currency(&user1(), amount(1000))
        .unwrap();

    exchange.set_exchange_ratio(&admin(), 10).unwrap();
    assert_eq!(exchange.get_pending_order(1).unwrap().amount, amount(1000));

    // 1000 / 10 = 100, which the pool already covers
    let payout = exchange.execute_pending_order(&admin(), 1).unwrap();
    assert_eq!(payout, amount(100));
    assert_eq!(exchange.currency_balance().unwrap(), Amount::ZERO);
}

#[test]
fn test_failed_swap_is_fully_reverted() {
    let mut exchange = setup();
    provision(&mut exchange);
    let events_before = exchange.events().len();

    // No allowance granted
    let result = exchange.exchange_token_to_currency(&user1(), amount(50));
    assert!(matches!(result, Err(ExchangeError::TransferFailure(_))));

    // More currency attached than the user owns
    let result = exchange.exchange_currency_to_token(&CallContext::with_value("user1", amount(5000)));
    assert!(matches!(result, Err(ExchangeError::TransferFailure(_))));

    assert_eq!(exchange.token_balance().unwrap(), amount(1000));
    assert_eq!(exchange.currency_balance().unwrap(), amount(100));
    assert_eq!(exchange.ledger().balance_of(&user1()), amount(1000));
    assert_eq!(exchange.ledger().native_balance(&user1()), amount(1000));
    assert_eq!(exchange.next_order_id().unwrap(), 1);
    assert_eq!(exchange.events().len(), events_before);
}

#[test]
fn test_order_ids_strictly_increase() {
    let mut exchange = setup();
    approve(&mut exchange, &user1(), 1000);

    // Both pools start empty, so every swap is deferred. Currency swaps go
    // first: escrowed tokens would otherwise let them settle.
    let mut ids = Vec::new();
    for _ in 0..3 {
        match exchange
            .exchange_currency_to_token(&CallContext::with_value("user1", amount(1)))
            .unwrap()
        {
            SwapOutcome::Pending { order_id } => ids.push(order_id),
            other => panic!("expected pending order, got {:?}", other),
        }
    }
    for _ in 0..3 {
        match exchange
            .exchange_token_to_currency(&user1(), amount(100))
            .unwrap()
        {
            SwapOutcome::Pending { order_id } => ids.push(order_id),
            other => panic!("expected pending order, got {:?}", other),
        }
    }

    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(exchange.next_order_id().unwrap(), 7);
    assert_eq!(exchange.pending_orders().unwrap().len(), 6);
}

#[test]
fn test_transfer_ownership() {
    let mut exchange = setup();
    let ops = AccountId::new("ops");

    exchange.transfer_ownership(&admin(), ops.clone()).unwrap();
    assert_eq!(exchange.owner().unwrap(), &ops);

    assert!(matches!(
        exchange.set_exchange_ratio(&admin(), 7),
        Err(ExchangeError::Unauthorized(_))
    ));
    exchange.set_exchange_ratio(&ops, 7).unwrap();
    assert_eq!(exchange.exchange_ratio().unwrap().get(), 7);
}

#[test]
fn test_event_log() {
    let mut exchange = setup();
    provision(&mut exchange);
    approve(&mut exchange, &user1(), 1000);
    exchange
        .exchange_token_to_currency(&user1(), amount(50))
        .unwrap();
    exchange
        .exchange_token_to_currency(&user1(), amount(900))
        .unwrap();

    let events = exchange.events();
    assert!(matches!(events[0], ExchangeEvent::Initialized { .. }));
    assert_eq!(
        events[1],
        ExchangeEvent::TokenDeposited {
            from: admin(),
            amount: amount(1000)
        }
    );
    assert_eq!(
        events[2],
        ExchangeEvent::CurrencyDeposited {
            from: admin(),
            amount: amount(100)
        }
    );
    assert_eq!(
        events[3],
        ExchangeEvent::Swapped {
            user: user1(),
            direction: Direction::TokenToCurrency,
            amount_in: amount(50),
            amount_out: amount(10),
        }
    );
    assert_eq!(
        events[4],
        ExchangeEvent::OrderCreated {
            order_id: 1,
            user: user1(),
            direction: Direction::TokenToCurrency,
            amount: amount(900),
        }
    );
    assert_eq!(events.len(), 5);
}

#[test]
fn test_bootstrap_from_config() {
    let config = ExchangeConfig::from_json(
        r#"{
            "administrator": "ops",
            "genesis": [
                {"account": "ops", "token": 5000, "currency": 300},
                {"account": "alice", "token": 40}
            ]
        }"#,
    )
    .unwrap();

    let exchange = Exchange::bootstrap(config, MemoryLedger::new()).unwrap();
    assert!(exchange.is_initialized());
    assert_eq!(exchange.owner().unwrap(), &AccountId::new("ops"));
    assert_eq!(
        exchange.ledger().balance_of(&AccountId::new("ops")),
        amount(5000)
    );
    assert_eq!(
        exchange.ledger().native_balance(&AccountId::new("ops")),
        amount(300)
    );
    assert_eq!(
        exchange.ledger().balance_of(&AccountId::new("alice")),
        amount(40)
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_token_swap_settles_or_defers(
        pool in 0u128..500,
        offered in 0u128..5000,
        ratio in 1u64..20,
    ) {
        let mut exchange = setup();
        exchange.set_exchange_ratio(&admin(), ratio).unwrap();
        exchange
            .deposit_currency(&CallContext::with_value("admin", amount(pool)))
            .unwrap();
        exchange.ledger_mut().mint(&user1(), amount(offered)).unwrap();
        approve(&mut exchange, &user1(), offered);

        let native_before = exchange.ledger().native_balance(&user1());
        let outcome = exchange.exchange_token_to_currency(&user1(), amount(offered)).unwrap();
        let expected = offered / u128::from(ratio);

        prop_assert_eq!(exchange.token_balance().unwrap(), amount(offered));
        match outcome {
            SwapOutcome::Settled { payout } => {
                prop_assert!(expected <= pool);
                prop_assert_eq!(payout, amount(expected));
                prop_assert_eq!(
                    exchange.ledger().native_balance(&user1()),
                    amount(native_before.units() + expected)
                );
                prop_assert_eq!(exchange.next_order_id().unwrap(), 1);
            }
            SwapOutcome::Pending { order_id } => {
                prop_assert!(expected > pool);
                prop_assert_eq!(order_id, 1);
                prop_assert_eq!(exchange.ledger().native_balance(&user1()), native_before);
                let order = exchange.get_pending_order(order_id).unwrap();
                prop_assert_eq!(order.amount, amount(offered));
                prop_assert_eq!(order.direction, Direction::TokenToCurrency);
            }
        }
        assert_currency_mirror(&exchange);
    }

    #[test]
    fn prop_currency_swap_settles_or_defers(
        pool in 0u128..5000,
        offered in 0u128..1000,
        ratio in 1u64..20,
    ) {
        let mut exchange = setup();
        exchange.set_exchange_ratio(&admin(), ratio).unwrap();
        approve(&mut exchange, &admin(), pool);
        exchange.deposit_token(&admin(), amount(pool)).unwrap();

        let tokens_before = exchange.ledger().balance_of(&user1());
        let outcome = exchange
            .exchange_currency_to_token(&CallContext::with_value("user1", amount(offered)))
            .unwrap();
        let expected = offered * u128::from(ratio);

        prop_assert_eq!(exchange.currency_balance().unwrap(), amount(offered));
        match outcome {
            SwapOutcome::Settled { payout } => {
                prop_assert!(expected <= pool);
                prop_assert_eq!(payout, amount(expected));
                prop_assert_eq!(exchange.token_balance().unwrap(), amount(pool - expected));
                prop_assert_eq!(
                    exchange.ledger().balance_of(&user1()),
                    amount(tokens_before.units() + expected)
                );
            }
            SwapOutcome::Pending { order_id } => {
                prop_assert!(expected > pool);
                prop_assert_eq!(order_id, 1);
                prop_assert_eq!(exchange.token_balance().unwrap(), amount(pool));
                prop_assert_eq!(exchange.ledger().balance_of(&user1()), tokens_before);
            }
        }
        assert_currency_mirror(&exchange);
    }
}
