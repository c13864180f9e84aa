use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use reelprice_cli::cli::{Cli, Commands};
use reelprice_cli::{config, interactive, server};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Browse { timeout_ms } => {
            let reel = config::interactive_reel(
                &cli.api_url,
                &cli.token,
                Duration::from_millis(timeout_ms),
            )
            .context("failed to configure movie providers")?;
            let stdin = std::io::stdin();
            interactive::run(&reel, stdin.lock(), std::io::stdout()).await?;
        }
        Commands::Serve {
            host,
            port,
            request_timeout_secs,
        } => {
            let reel = config::served_reel(
                &cli.api_url,
                &cli.token,
                Duration::from_secs(request_timeout_secs),
            )
            .context("failed to configure movie providers")?;
            let addr: SocketAddr = format!("{host}:{port}")
                .parse()
                .with_context(|| format!("invalid listen address {host}:{port}"))?;
            server::run_server(addr, reel).await?;
        }
    }

    Ok(())
}
