use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::state::AppState;

/// Create the API application router
pub fn create_app(state: AppState) -> Router {
    Router::new()
        // Health and info
        .route("/health", get(handlers::health))
        .route("/v1/info", get(handlers::info))
        .route("/v1/status", get(handlers::get_system_status))

        // Balances
        .route("/v1/balances", get(handlers::get_balances))
        .route("/v1/accounts/:account", get(handlers::get_account))

        // Token ledger
        .route("/v1/token/approve", post(handlers::approve))

        // Administration
        .route("/v1/admin/ratio", post(handlers::set_exchange_ratio))
        .route("/v1/admin/deposit/token", post(handlers::deposit_token))
        .route("/v1/admin/deposit/currency", post(handlers::deposit_currency))
        .route("/v1/admin/orders/:order_id/execute", post(handlers::execute_order))
        .route("/v1/admin/owner", post(handlers::transfer_ownership))

        // Swaps
        .route("/v1/swap/token-to-currency", post(handlers::swap_token_to_currency))
        .route("/v1/swap/currency-to-token", post(handlers::swap_currency_to_token))

        // Orders and events
        .route("/v1/orders", get(handlers::list_orders))
        .route("/v1/orders/:order_id", get(handlers::get_order))
        .route("/v1/events", get(handlers::list_events))

        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
