//! CLI entry point for pressroom

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pressroom::cache::PostCache;
use pressroom::config::SiteConfig;
use pressroom::server::{self, AppState};
use pressroom::source::GithubClient;
use pressroom::templates::TemplateRenderer;

#[derive(Parser)]
#[command(name = "pressroom")]
#[command(version)]
#[command(about = "Serve the company site and its insights blog", long_about = None)]
struct Cli {
    /// Path to the site configuration file
    #[arg(short, long, default_value = "_config.yml")]
    config: PathBuf,

    /// IP address to bind to (overrides the config file)
    #[arg(short, long)]
    bind: Option<String>,

    /// Port to listen on (overrides the config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "pressroom=debug,info"
    } else {
        "pressroom=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = if cli.config.exists() {
        SiteConfig::load(&cli.config)?
    } else {
        tracing::info!("no config file at {:?}, using defaults", cli.config);
        SiteConfig::default()
    };

    let bind = cli.bind.unwrap_or_else(|| config.server.bind.clone());
    let port = cli.port.unwrap_or(config.server.port);

    let client = GithubClient::new(&config.content)?;
    let cache = PostCache::new(client, &config);
    let templates = TemplateRenderer::new()?;

    tracing::info!(
        "serving {} with insights from {}",
        config.title,
        config.content.repo
    );

    server::start(
        AppState {
            config,
            cache,
            templates,
        },
        &bind,
        port,
    )
    .await
}
