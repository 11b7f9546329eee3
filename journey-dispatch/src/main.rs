use journey_dispatch::config::AppConfig;
use journey_dispatch::dispatch::{DispatchClient, MockDispatchClient};
use journey_dispatch::web::{AppState, create_router};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    let app = match config.dispatch {
        Some(dispatch_config) => {
            info!(base_url = %dispatch_config.base_url, "Using dispatch API");
            let client = match DispatchClient::new(dispatch_config) {
                Ok(client) => client,
                Err(e) => {
                    error!(error = %e, "Failed to create dispatch client");
                    std::process::exit(1);
                }
            };
            create_router(AppState::new(client))
        }
        None => {
            warn!("DISPATCH_BASE_URL not set, journeys go to the in-memory mock");
            create_router(AppState::new(MockDispatchClient::new()))
        }
    };

    let addr = config.bind_addr;
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%addr, error = %e, "Failed to bind");
            std::process::exit(1);
        }
    };

    info!(%addr, "Journey dispatch listening");
    info!("  GET  /health           - Health check");
    info!("  POST /journey/preview  - Plan a journey without submitting");
    info!("  POST /journey/submit   - Plan and submit a journey");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server error");
        std::process::exit(1);
    }
}
