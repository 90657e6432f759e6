use anyhow::Result;
use async_trait::async_trait;

use crate::models::ProductRecord;

mod category;

pub use category::{next_page_url, CategoryCrawler};

#[async_trait]
pub trait ProductScraper: Send + Sync {
    async fn scrape(&self) -> Result<Vec<ProductRecord>>;
}
