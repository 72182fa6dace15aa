//! LayerX Control Plane Server

use std::net::SocketAddr;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use layerx_control_plane::http::create_router;
use layerx_control_plane::{AppState, Config};

/// LayerX control plane server.
#[derive(Parser, Debug)]
#[command(name = "layerx-control-plane", about = "LayerX control plane server")]
struct Args {
    /// HTTP server address
    #[arg(long, env = "LAYERX_HTTP_ADDR", default_value = "0.0.0.0:5000")]
    http_addr: String,

    /// Maximum status updates kept for draining
    #[arg(long, env = "LAYERX_STATUS_QUEUE_CAPACITY", default_value = "1024")]
    status_queue_capacity: usize,

    /// Number of terminated tasks kept for inspection
    #[arg(long, env = "LAYERX_TERMINAL_HISTORY", default_value = "256")]
    terminal_history: usize,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            http_bind_addr: args.http_addr,
            status_queue_capacity: args.status_queue_capacity,
            terminal_history: args.terminal_history,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config: Config = Args::parse().into();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("layerx=info".parse()?))
        .with_target(true)
        .init();

    let http_addr: SocketAddr = config.http_bind_addr.parse()?;

    // Create shared state
    let state = AppState::with_config(&config);

    info!(
        http_addr = %http_addr,
        status_queue_capacity = config.status_queue_capacity,
        terminal_history = config.terminal_history,
        "Starting LayerX control plane"
    );

    let router = create_router(state);
    let listener = TcpListener::bind(http_addr).await?;

    info!("HTTP server listening on {}", http_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for shutdown signal");
            }
            info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
