use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use booking_lookup::app::App;
use booking_lookup::config::AppConfig;
use booking_lookup::gateway::{HttpGateway, MockGateway, StationGateway};
use booking_lookup::store::SelectionStore;
use booking_lookup::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("booking_lookup=info")),
        )
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "booking lookup failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    match &config.fixture_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "serving stations from fixture");
            let gateway = MockGateway::from_json_file(path)?;
            serve(gateway, config).await
        }
        None => {
            tracing::info!(base_url = %config.gateway.base_url, "using bookings API");
            let gateway = HttpGateway::new(config.gateway.clone())?;
            serve(gateway, config).await
        }
    }
}

async fn serve<G: StationGateway>(
    gateway: G,
    config: AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = App::new(gateway, Arc::new(SelectionStore::new()), config.search.clone());
    let router = create_router(AppState::new(app), &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        strategy = %config.search.strategy,
        "booking lookup listening"
    );

    axum::serve(listener, router).await?;
    Ok(())
}
