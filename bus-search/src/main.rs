use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use bus_search::config::{DataSourceConfig, ServerConfig};
use bus_search::source::{MemoryTripSource, SqlTripSource, TripSource};
use bus_search::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    let state = match config.require_data_source()? {
        DataSourceConfig::Database {
            url,
            max_connections,
        } => {
            let source = SqlTripSource::connect_lazy(url, *max_connections)?;
            info!(source = %source.describe(), "using SQL trip source");
            AppState::new(source, config.settings)
        }
        DataSourceConfig::File(path) => {
            let source = MemoryTripSource::from_json_file(path)?;
            info!(source = %source.describe(), "using in-memory trip source");
            AppState::new(source, config.settings)
        }
    };

    let app = create_router(state, &config.static_dir);

    info!(
        rating_policy = config.settings.rating_policy.name(),
        empty_filter = config.settings.empty_filter_policy.name(),
        "dashboard settings"
    );
    info!("Bus Route Search listening on http://{}", config.addr);
    info!("  GET  /              - Dashboard");
    info!("  GET  /health        - Health check");
    info!("  GET  /api/routes    - Routes by prefix");
    info!("  GET  /api/trips     - Trips on a route");
    info!("  GET  /api/search    - Filtered trips on a route");

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
