use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use watchlist_api::api::{create_router, AppState};
use watchlist_api::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "watchlist_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let state = AppState::new();
    if config.seed_on_start {
        let added = state.seed().await;
        tracing::info!(added, "Seeded sample watchlist");
    }

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
