//! Confluence API Server
//!
//! Serves one-shot analyses plus a shared session that recomputes whenever
//! bars or RSI settings are replaced.

use confluence::config::{get_environment, Config};
use confluence::core::http::start_server;
use confluence::logging;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let config = Config::from_env()?;
    let port = config.port;

    info!("Starting Confluence API Server");
    info!(environment = %get_environment(), "Environment");
    info!(symbol = %config.symbol, "Instrument");
    info!(
        period = config.settings.period,
        overbought = config.settings.overbought,
        oversold = config.settings.oversold,
        smoothing = %config.settings.smoothing,
        "Default RSI settings"
    );
    info!(port = port, "HTTP Server: http://0.0.0.0:{}", port);

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(config).await {
            error!(error = %e, "HTTP server error");
        }
    });

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
