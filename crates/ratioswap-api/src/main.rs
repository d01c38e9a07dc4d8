use ratioswap_api::{create_app, AppState};
use ratioswap_exchange::ExchangeConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::var("RATIOSWAP_CONFIG") {
        Ok(path) => ExchangeConfig::from_file(&path)?,
        Err(_) => ExchangeConfig::default(),
    };
    let addr = config.api_addr();

    let state = AppState::from_config(config)?;
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("RatioSwap API server running on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
