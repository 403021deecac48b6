use std::error::Error;

use tracing_subscriber::EnvFilter;

use coinratio::dashboard::{self, AppState, DashboardConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env is fine; the environment alone is enough.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cfg = DashboardConfig::from_env();
    let addr = cfg.socket_addr()?;
    tracing::info!(
        upstream = %cfg.api_url,
        cache_ttl_secs = cfg.cache_ttl.as_secs(),
        retries = cfg.http_retries,
        "starting dashboard"
    );

    let state = AppState::new(&cfg)?;
    let app = dashboard::router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("coinratio dashboard listening on http://{addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install Ctrl+C handler: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, gracefully stopping…");
}
