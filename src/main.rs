use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shop_sitemaps::{
    client::{ApiSurface, GraphqlClient, ShopifyCatalog},
    config::{defaults::DEFAULT_CONFIG_FILE, Config, Credentials},
    utils::human_format::format_elapsed,
    RunSummary, SitemapRunner,
};

#[derive(Parser)]
#[command(name = "shop-sitemaps")]
#[command(version)]
#[command(about = "Image and video XML sitemaps for a Shopify store")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Output file (overrides config file)
    #[arg(short, long, global = true, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Log level
    #[arg(short = 'v', long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Blog article and game-release images, from the storefront API
    Images,
    /// Video metaobjects, from the admin API
    Videos,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_filter = if cli.log_level == "trace" {
        format!("shop_sitemaps={},reqwest=debug", cli.log_level)
    } else {
        format!("shop_sitemaps={}", cli.log_level)
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting shop-sitemaps v{}", env!("CARGO_PKG_VERSION"));

    match run(cli).await {
        Ok(summary) => {
            info!(
                "Done: {} written in {}",
                summary.output_path.display(),
                format_elapsed(summary.elapsed)
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Sitemap generation failed: {:#}", e);
            eprintln!("shop-sitemaps: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<RunSummary> {
    let config = Config::load_from_file(&cli.config)?;
    let credentials = Credentials::from_env(&config.api)?;

    let surface = match cli.command {
        Command::Images => ApiSurface::Storefront,
        Command::Videos => ApiSurface::Admin,
    };
    let client = GraphqlClient::new(surface, &config.shop, &config.api, credentials)?;
    info!("Using {} API at {}", surface.as_str(), client.endpoint());

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling run");
            on_interrupt.cancel();
        }
    });

    let catalog = ShopifyCatalog::new(client, cancel);
    let runner = SitemapRunner::new(&config).with_output_path(cli.output);

    let summary = match cli.command {
        Command::Images => runner.run_images(&catalog).await,
        Command::Videos => runner.run_videos(&catalog).await,
    }
    .context("run aborted")?;

    Ok(summary)
}
