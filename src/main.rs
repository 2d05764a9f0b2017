//! Medassist CLI entry point.

use anyhow::Context as _;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "medassist")]
#[command(about = "Medical assistant chat service backed by the Groq API")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = medassist::config::Config::load()
        .with_context(|| "failed to load configuration from environment")?;

    tracing::info!(model = %config.groq.model, bind = %config.bind, "configuration loaded");

    let backend = Arc::new(medassist::llm::GroqClient::new(config.groq.clone()));
    let contexts = medassist::conversation::ContextStore::new(config.context);
    let orchestrator = medassist::orchestrator::Orchestrator::new(backend, contexts);
    let state = Arc::new(medassist::api::ApiState::new(orchestrator));

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let server = medassist::api::start_http_server(config.bind, state, shutdown_rx)
        .await
        .with_context(|| "failed to start HTTP server")?;

    tokio::signal::ctrl_c()
        .await
        .with_context(|| "failed to listen for shutdown signal")?;

    tracing::info!("shutdown signal received");
    let _ = shutdown_tx.send(true);
    server.await?;

    Ok(())
}
