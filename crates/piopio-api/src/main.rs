//! PíoPío relay entry point.
//!
//! Binary name: `piopio`
//!
//! Loads `.env`, parses configuration, initializes tracing, wires the relays
//! and serves `/chat`, `/tts` and `/health` until Ctrl+C or SIGTERM.

mod cli;
mod http;
mod state;
mod sweeper;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use piopio_observe::tracing_setup::{TracingOptions, init_tracing, shutdown_tracing};

use cli::Cli;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&TracingOptions {
        format: cli.log_format,
        default_filter: cli.default_log_filter().to_string(),
        enable_otel: cli.otel,
    })
    .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let state = AppState::from_cli(&cli)?;

    let shutdown = CancellationToken::new();
    let sweeper = sweeper::spawn_session_sweeper(
        state.chat.store().clone(),
        sweeper::SWEEP_INTERVAL,
        shutdown.clone(),
    );

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "piopio relay listening");

    let router = http::router::build_router(state);
    let served = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    shutdown.cancel();
    if let Err(e) = sweeper.await {
        error!(error = %e, "session sweeper task failed");
    }
    info!("server stopped");
    shutdown_tracing();

    served?;
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
