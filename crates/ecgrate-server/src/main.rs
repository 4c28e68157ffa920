use anyhow::{Context, Result};
use clap::Parser;
use ecgrate_server::{app, AppState, ServerConfig};
use env_logger::Env;
use log::info;
use std::path::PathBuf;
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(author, version, about = "ecgrate HTTP server", long_about = None)]
struct Cli {
    /// Logging verbosity (e.g., debug, info, warn)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// TOML file with server settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured listen host
    #[arg(long)]
    host: Option<String>,

    /// Override the configured listen port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(&args.log_level)).init();

    let mut config = ServerConfig::load(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!(
        "Listening on http://{} (cors={}, max_upload_bytes={}, timeout={}s)",
        addr, config.cors_allowed_origins, config.max_upload_bytes, config.request_timeout_secs
    );

    axum::serve(listener, app(&config, AppState::default()))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for shutdown signal: {}", err);
    }
    info!("Shutdown signal received");
}
