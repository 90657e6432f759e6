use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{error, info, warn};
use url::Url;

use crate::config::Config;
use crate::models::ProductRecord;
use crate::parsers::{extract_listing_links, extract_record};
use crate::scrapers::ProductScraper;
use crate::utils::http::PageSource;

/// Walks a paginated category listing and scrapes every product it links to.
pub struct CategoryCrawler<S: PageSource> {
    config: Arc<Config>,
    source: S,
}

impl<S: PageSource> CategoryCrawler<S> {
    pub fn new(config: Arc<Config>, source: S) -> Self {
        Self { config, source }
    }

    fn page_url(&self, page: u32) -> Result<String> {
        if page == 1 {
            Ok(self.config.category_url.clone())
        } else {
            next_page_url(&self.config.category_url, page)
        }
    }
}

/// The category URL with its `p` query parameter set to `page`.
pub fn next_page_url(category_url: &str, page: u32) -> Result<String> {
    let mut url = Url::parse(category_url)
        .with_context(|| format!("Invalid category URL: {}", category_url))?;

    let mut query: Vec<(String, String)> =
        serde_urlencoded::from_str(url.query().unwrap_or_default())
            .context("Failed to decode category query string")?;
    query.retain(|(key, _)| key != "p");
    query.push(("p".to_string(), page.to_string()));

    let encoded = serde_urlencoded::to_string(&query)
        .context("Failed to encode category query string")?;
    url.set_query(Some(&encoded));
    Ok(url.to_string())
}

#[async_trait]
impl<S: PageSource> ProductScraper for CategoryCrawler<S> {
    async fn scrape(&self) -> Result<Vec<ProductRecord>> {
        let base_url = self.config.base_url()?;
        let min_records = self.config.min_records;

        let mut records = Vec::new();
        let mut seen = HashSet::new();
        let mut page = 1;

        while records.len() < min_records && page <= self.config.max_pages {
            let page_url = self.page_url(page)?;
            info!("[Category] Fetch page {}: {}", page, page_url);

            let html = match self.source.fetch(&page_url).await {
                Ok(html) => html,
                Err(e) => {
                    error!("Failed listing page {}: {}", page, e);
                    break;
                }
            };

            let links = extract_listing_links(&html, &base_url);
            info!("Found {} product links", links.len());

            if links.is_empty() && page > 1 {
                info!("No more links; stopping pagination");
                break;
            }

            for product_url in links {
                if !seen.insert(product_url.clone()) {
                    continue;
                }

                let html = match self.source.fetch(&product_url).await {
                    Ok(html) => html,
                    Err(e) => {
                        warn!("Failed product {}: {}", product_url, e);
                        continue;
                    }
                };

                let record = extract_record(&html, &product_url);
                info!(
                    "+ {} | price={:?} | url={}",
                    record.name.as_deref().unwrap_or("[no name]"),
                    record.price_pln,
                    product_url
                );
                records.push(record);

                if records.len() >= min_records {
                    break;
                }
            }

            page += 1;
        }

        if records.len() < min_records {
            warn!(
                "Collected {} records, fewer than the target of {}",
                records.len(),
                min_records
            );
        }

        Ok(records)
    }
}
