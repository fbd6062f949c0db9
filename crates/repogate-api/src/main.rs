use anyhow::{Context, Result};
use clap::Parser;
use repogate_api::Server;
use repogate_core::ConfigManager;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Serve a git checkout over HTTP and publish edits back to its remote.
#[derive(Parser, Debug)]
#[command(name = "repogate-server", version, about)]
struct Args {
    /// Directory holding default.toml, <env>.toml and local.toml
    #[arg(long, env = "REPOGATE_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Configuration environment (falls back to APP_ENV, then "development")
    #[arg(long)]
    env: Option<String>,

    /// Override server.host
    #[arg(long)]
    host: Option<String>,

    /// Override server.port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings =
        ConfigManager::load(args.config_dir, args.env).context("loading configuration")?;
    if let Some(host) = args.host {
        settings.server.host = host;
    }
    if let Some(port) = args.port {
        settings.server.port = port;
    }

    let default_filter = format!("{},tower_http=debug", settings.logging.level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let server = Server::new(settings).await?;
    server.run().await
}
