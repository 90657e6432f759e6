use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

const DEFAULT_CONFIG_FILE: &str = "scraper";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub category_url: String,
    pub min_records: usize,
    pub max_pages: u32,
    pub delay_min_secs: f64,
    pub delay_max_secs: f64,
    pub max_retries: u32,
    pub backoff_factor: f64,
    pub retry_statuses: Vec<u16>,
    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
    pub user_agents: Vec<String>,
    pub accept_language: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            category_url: "https://www.komputronik.pl/category/5022/laptopy.html".to_string(),
            min_records: 100,
            max_pages: 999,
            delay_min_secs: 20.0,
            delay_max_secs: 30.0,
            max_retries: 3,
            backoff_factor: 0.8,
            retry_statuses: vec![429, 500, 502, 503, 504],
            connect_timeout_secs: 8,
            read_timeout_secs: 20,
            user_agents: vec![
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36".to_string(),
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.3 Safari/605.1.15".to_string(),
                "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36".to_string(),
            ],
            accept_language: "pl-PL,pl;q=0.9,en;q=0.8".to_string(),
        }
    }
}

impl Config {
    /// Defaults, then `scraper.toml` (or `path`) if present, then `SCRAPER_*` env vars.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = config::Config::builder()
            .add_source(file)
            .add_source(config::Environment::with_prefix("SCRAPER"))
            .build()
            .context("Failed to read scraper configuration")?;

        let config: Config = settings
            .try_deserialize()
            .context("Invalid scraper configuration")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        Url::parse(&self.category_url)
            .with_context(|| format!("Invalid category_url: {}", self.category_url))?;
        if self.delay_min_secs < 0.0 || self.delay_max_secs < self.delay_min_secs {
            anyhow::bail!(
                "Invalid delay range: {}..{} seconds",
                self.delay_min_secs,
                self.delay_max_secs
            );
        }
        if self.user_agents.is_empty() {
            anyhow::bail!("At least one user agent is required");
        }
        Ok(())
    }

    /// `scheme://host/` of the category URL, used to resolve relative links.
    pub fn base_url(&self) -> Result<String> {
        let url = Url::parse(&self.category_url)
            .with_context(|| format!("Invalid category_url: {}", self.category_url))?;
        let host = url.host_str().context("category_url has no host")?;
        let port = url.port().map(|p| format!(":{}", p)).unwrap_or_default();
        Ok(format!("{}://{}{}/", url.scheme(), host, port))
    }
}
