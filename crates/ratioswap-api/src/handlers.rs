use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ratioswap_exchange::{
    CallContext, Exchange, ExchangeError, ExchangeEvent, InvalidOrderReason, SwapOutcome,
    SystemStatus,
};
use ratioswap_ledger::{MemoryLedger, NativeLedger, TokenLedger};
use ratioswap_types::{AccountId, Amount, ExchangeRatio, Order, OrderId};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Exchange failure rendered as `{"error": ..., "kind": ...}`
pub struct ApiError(ExchangeError);

impl From<ExchangeError> for ApiError {
    fn from(err: ExchangeError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self.0 {
            ExchangeError::Unauthorized(_) => (StatusCode::FORBIDDEN, "unauthorized"),
            ExchangeError::InvalidOrder {
                reason: InvalidOrderReason::NotFound,
                ..
            } => (StatusCode::NOT_FOUND, "invalid_order"),
            ExchangeError::InvalidOrder {
                reason: InvalidOrderReason::AlreadyExecuted,
                ..
            } => (StatusCode::CONFLICT, "invalid_order"),
            ExchangeError::InsufficientLiquidity { .. } => {
                (StatusCode::CONFLICT, "insufficient_liquidity")
            }
            ExchangeError::TransferFailure(_) => (StatusCode::PAYMENT_REQUIRED, "transfer_failure"),
            ExchangeError::InvalidRatio(_) => (StatusCode::BAD_REQUEST, "invalid_ratio"),
            ExchangeError::InvalidAmount(_) => (StatusCode::BAD_REQUEST, "invalid_amount"),
            ExchangeError::NotInitialized => (StatusCode::CONFLICT, "not_initialized"),
            ExchangeError::AlreadyInitialized => (StatusCode::CONFLICT, "already_initialized"),
            ExchangeError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config"),
        };

        let body = serde_json::json!({
            "error": self.0.to_string(),
            "kind": kind,
        });
        (status, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Serialize)]
pub struct InfoResponse {
    pub name: String,
    pub token_contract: AccountId,
    pub owner: AccountId,
    pub exchange_account: AccountId,
    pub exchange_ratio: ExchangeRatio,
}

impl InfoResponse {
    fn of(exchange: &Exchange<MemoryLedger>) -> Result<Self, ExchangeError> {
        Ok(InfoResponse {
            name: "RatioSwap".to_string(),
            token_contract: exchange.token_contract()?.clone(),
            owner: exchange.owner()?.clone(),
            exchange_account: exchange.exchange_account().clone(),
            exchange_ratio: exchange.exchange_ratio()?,
        })
    }
}

#[derive(Serialize)]
pub struct StatusResponse {
    #[serde(flatten)]
    pub status: SystemStatus,
    pub uptime_seconds: u64,
}

#[derive(Serialize)]
pub struct BalancesResponse {
    pub token_liquidity: Amount,
    pub currency_liquidity: Amount,
}

#[derive(Serialize)]
pub struct AccountResponse {
    pub account: AccountId,
    pub token: Amount,
    pub currency: Amount,
    /// Tokens the exchange may still pull from this account
    pub allowance: Amount,
}

#[derive(Deserialize)]
pub struct ApproveRequest {
    pub owner: AccountId,
    pub amount: Amount,
}

#[derive(Deserialize)]
pub struct RatioRequest {
    pub caller: AccountId,
    pub ratio: i64,
}

#[derive(Deserialize)]
pub struct AmountRequest {
    pub caller: AccountId,
    pub amount: Amount,
}

/// Call carrying native currency
#[derive(Deserialize)]
pub struct ValueRequest {
    pub caller: AccountId,
    pub value: Amount,
}

#[derive(Deserialize)]
pub struct CallerRequest {
    pub caller: AccountId,
}

#[derive(Deserialize)]
pub struct OwnerRequest {
    pub caller: AccountId,
    pub new_owner: AccountId,
}

#[derive(Serialize)]
pub struct ExecuteResponse {
    pub order: Order,
    pub payout: Amount,
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Info endpoint
pub async fn info(State(state): State<AppState>) -> ApiResult<InfoResponse> {
    let exchange = state.exchange();
    Ok(Json(InfoResponse::of(&exchange)?))
}

/// Get system status and metrics
pub async fn get_system_status(State(state): State<AppState>) -> ApiResult<StatusResponse> {
    let status = state.exchange().get_status()?;
    Ok(Json(StatusResponse {
        status,
        uptime_seconds: state.uptime_seconds(),
    }))
}

/// Pool sizes
pub async fn get_balances(State(state): State<AppState>) -> ApiResult<BalancesResponse> {
    let exchange = state.exchange();
    Ok(Json(BalancesResponse {
        token_liquidity: exchange.token_balance()?,
        currency_liquidity: exchange.currency_balance()?,
    }))
}

/// Wallet balances of any account
pub async fn get_account(
    State(state): State<AppState>,
    Path(account): Path<String>,
) -> Json<AccountResponse> {
    let account = AccountId::new(account);
    let exchange = state.exchange();
    let ledger = exchange.ledger();

    Json(AccountResponse {
        token: ledger.balance_of(&account),
        currency: ledger.native_balance(&account),
        allowance: ledger.allowance(&account, exchange.exchange_account()),
        account,
    })
}

/// Let the exchange pull up to `amount` of the owner's tokens
pub async fn approve(
    State(state): State<AppState>,
    Json(req): Json<ApproveRequest>,
) -> ApiResult<AccountResponse> {
    let mut exchange = state.exchange();
    let spender = exchange.exchange_account().clone();
    exchange
        .ledger_mut()
        .approve(&req.owner, &spender, req.amount)
        .map_err(ExchangeError::TransferFailure)?;

    let ledger = exchange.ledger();
    Ok(Json(AccountResponse {
        token: ledger.balance_of(&req.owner),
        currency: ledger.native_balance(&req.owner),
        allowance: ledger.allowance(&req.owner, &spender),
        account: req.owner,
    }))
}

pub async fn set_exchange_ratio(
    State(state): State<AppState>,
    Json(req): Json<RatioRequest>,
) -> ApiResult<InfoResponse> {
    let mut exchange = state.exchange();
    exchange.authorize(&req.caller)?;

    let ratio = ExchangeRatio::try_from(req.ratio).map_err(ExchangeError::from)?;
    exchange.set_exchange_ratio(&req.caller, ratio.get())?;
    Ok(Json(InfoResponse::of(&exchange)?))
}

pub async fn deposit_token(
    State(state): State<AppState>,
    Json(req): Json<AmountRequest>,
) -> ApiResult<BalancesResponse> {
    let mut exchange = state.exchange();
    exchange.deposit_token(&req.caller, req.amount)?;
    Ok(Json(BalancesResponse {
        token_liquidity: exchange.token_balance()?,
        currency_liquidity: exchange.currency_balance()?,
    }))
}

pub async fn deposit_currency(
    State(state): State<AppState>,
    Json(req): Json<ValueRequest>,
) -> ApiResult<BalancesResponse> {
    let mut exchange = state.exchange();
    exchange.deposit_currency(&CallContext::with_value(req.caller, req.value))?;
    Ok(Json(BalancesResponse {
        token_liquidity: exchange.token_balance()?,
        currency_liquidity: exchange.currency_balance()?,
    }))
}

pub async fn execute_order(
    State(state): State<AppState>,
    Path(order_id): Path<OrderId>,
    Json(req): Json<CallerRequest>,
) -> ApiResult<ExecuteResponse> {
    let mut exchange = state.exchange();
    let payout = exchange.execute_pending_order(&req.caller, order_id)?;
    let order = exchange.get_pending_order(order_id)?.clone();
    Ok(Json(ExecuteResponse { order, payout }))
}

pub async fn transfer_ownership(
    State(state): State<AppState>,
    Json(req): Json<OwnerRequest>,
) -> ApiResult<InfoResponse> {
    let mut exchange = state.exchange();
    exchange.transfer_ownership(&req.caller, req.new_owner)?;
    Ok(Json(InfoResponse::of(&exchange)?))
}

pub async fn swap_token_to_currency(
    State(state): State<AppState>,
    Json(req): Json<AmountRequest>,
) -> ApiResult<SwapOutcome> {
    let outcome = state
        .exchange()
        .exchange_token_to_currency(&req.caller, req.amount)?;
    Ok(Json(outcome))
}

pub async fn swap_currency_to_token(
    State(state): State<AppState>,
    Json(req): Json<ValueRequest>,
) -> ApiResult<SwapOutcome> {
    let outcome = state
        .exchange()
        .exchange_currency_to_token(&CallContext::with_value(req.caller, req.value))?;
    Ok(Json(outcome))
}

/// All orders, executed ones included
pub async fn list_orders(State(state): State<AppState>) -> ApiResult<Vec<Order>> {
    let exchange = state.exchange();
    let orders = exchange.orders()?.into_iter().cloned().collect();
    Ok(Json(orders))
}

pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<OrderId>,
) -> ApiResult<Order> {
    let order = state.exchange().get_pending_order(order_id)?.clone();
    Ok(Json(order))
}

pub async fn list_events(State(state): State<AppState>) -> Json<Vec<ExchangeEvent>> {
    Json(state.exchange().events().to_vec())
}
