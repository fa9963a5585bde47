mod config;
mod error;
mod export;
mod models;
mod pipeline;
mod scrapers;

use anyhow::Context;
use clap::Parser;
use config::{Config, Engine};
use pipeline::ListingAcquirer;
use scrapers::{ChromePageSource, HttpPageSource, PageSource};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "directory-scout")]
#[command(about = "Scrape business listings from a directory search into CSV")]
struct Cli {
    /// Starting search URL
    #[arg(long)]
    url: String,

    /// Path to output CSV file
    #[arg(long)]
    out: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Invalid configuration")?;

    // Held for the whole run; dropping it shuts the browser down
    let source: Box<dyn PageSource> = match config.engine {
        Engine::Chrome => Box::new(
            ChromePageSource::launch(&config.user_agent).context("Failed to start browser")?,
        ),
        Engine::Http => Box::new(
            HttpPageSource::new(&config.user_agent).context("Failed to create HTTP client")?,
        ),
    };

    info!("Scraping: {} (engine: {})", cli.url, source.engine_name());
    let listings = ListingAcquirer::new(source.as_ref(), &config.settings)
        .acquire(&cli.url)
        .await
        .context("Failed to scrape listings")?;
    drop(source);

    match export::export_to_csv(&listings, &cli.out).await {
        Ok(0) => info!("No data to export."),
        Ok(count) => info!("✅ Exported {} records to {}", count, cli.out.display()),
        Err(e) => error!("❌ Failed to export to CSV: {}", e),
    }

    Ok(())
}
