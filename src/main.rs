use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use laptop_scraper::config::Config;
use laptop_scraper::scrapers::{CategoryCrawler, ProductScraper};
use laptop_scraper::utils::http::HttpFetcher;

/// Crawl a laptop category and print one JSON record per product.
#[derive(Debug, Parser)]
#[command(name = "laptop-scraper", version)]
struct Args {
    /// Configuration file (defaults to ./scraper.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Minimum number of records to collect
    #[arg(long)]
    min_records: Option<usize>,

    /// Maximum number of listing pages to visit
    #[arg(long)]
    max_pages: Option<u32>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("laptop_scraper=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(min_records) = args.min_records {
        config.min_records = min_records;
    }
    if let Some(max_pages) = args.max_pages {
        config.max_pages = max_pages;
    }
    let config = Arc::new(config);

    info!(
        "Starting crawl of {} at {}",
        config.category_url,
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );

    let fetcher = HttpFetcher::new(&config).context("Failed to create HTTP client")?;
    let crawler = CategoryCrawler::new(config.clone(), fetcher);
    let records = crawler.scrape().await?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for record in &records {
        serde_json::to_writer(&mut out, record)?;
        writeln!(out)?;
    }
    out.flush()?;

    info!(
        "Rows: {} | Columns: {}",
        records.len(),
        laptop_scraper::ProductRecord::COLUMNS.len()
    );
    Ok(())
}
