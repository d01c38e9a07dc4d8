use ratioswap_exchange::{CallContext, Exchange, ExchangeConfig, SwapOutcome};
use ratioswap_ledger::{MemoryLedger, NativeLedger, TokenLedger};
use ratioswap_types::{AccountId, Amount};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = ExchangeConfig::default();
    let admin = config.administrator.clone();
    let mut exchange = Exchange::bootstrap(config, MemoryLedger::new())?;
    let custody = exchange.exchange_account().clone();

    let user = AccountId::new("user1");
    exchange.ledger_mut().mint(&user, Amount::new(1000))?;

    // Provision the pools: 1000 token, 100 currency
    exchange
        .ledger_mut()
        .approve(&admin, &custody, Amount::new(1000))?;
    exchange.deposit_token(&admin, Amount::new(1000))?;
    exchange.deposit_currency(&CallContext::with_value(admin.clone(), Amount::new(100)))?;

    // 50 token at 5:1 settles immediately
    exchange
        .ledger_mut()
        .approve(&user, &custody, Amount::new(1000))?;
    let outcome = exchange.exchange_token_to_currency(&user, Amount::new(50))?;
    println!("swap 50 token -> {:?}", outcome);

    // 900 token needs 180 currency; only 90 left, so it waits
    let outcome = exchange.exchange_token_to_currency(&user, Amount::new(900))?;
    println!("swap 900 token -> {:?}", outcome);

    if let SwapOutcome::Pending { order_id } = outcome {
        exchange.deposit_currency(&CallContext::with_value(admin.clone(), Amount::new(200)))?;
        let payout = exchange.execute_pending_order(&admin, order_id)?;
        println!("order #{} executed, paid {}", order_id, payout);
    }

    println!(
        "user1 now holds {} token, {} currency",
        exchange.ledger().balance_of(&user),
        exchange.ledger().native_balance(&user)
    );
    println!("status: {}", serde_json::to_string_pretty(&exchange.get_status()?)?);
    Ok(())
}
