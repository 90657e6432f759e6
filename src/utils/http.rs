use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::Rng;
use reqwest::header::{ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, warn};
use url::Url;

use crate::config::Config;
use crate::error::FetchError;

/// Anything that can hand back the body of a page.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

pub fn create_client(config: &Config) -> Result<Client, FetchError> {
    let client = ClientBuilder::new()
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .timeout(Duration::from_secs(
            config.connect_timeout_secs + config.read_timeout_secs,
        ))
        .cookie_store(true)
        .build()?;

    Ok(client)
}

/// Polite sequential fetcher: random delay before each page, rotating user
/// agents, bounded retries on transient statuses.
pub struct HttpFetcher {
    client: Client,
    user_agents: Vec<String>,
    accept_language: String,
    delay_min_secs: f64,
    delay_max_secs: f64,
    max_retries: u32,
    backoff_factor: f64,
    retry_statuses: Vec<u16>,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        Ok(Self {
            client: create_client(config)?,
            user_agents: config.user_agents.clone(),
            accept_language: config.accept_language.clone(),
            delay_min_secs: config.delay_min_secs,
            delay_max_secs: config.delay_max_secs,
            max_retries: config.max_retries,
            backoff_factor: config.backoff_factor,
            retry_statuses: config.retry_statuses.clone(),
        })
    }

    fn polite_delay(&self) -> Duration {
        let secs = if self.delay_max_secs > self.delay_min_secs {
            rand::thread_rng().gen_range(self.delay_min_secs..=self.delay_max_secs)
        } else {
            self.delay_min_secs
        };
        Duration::from_secs_f64(secs.max(0.0))
    }

    fn backoff(&self, retry: u32) -> Duration {
        let secs = self.backoff_factor * 2f64.powi(retry.saturating_sub(1) as i32);
        Duration::from_secs_f64(secs.max(0.0))
    }

    fn user_agent(&self) -> &str {
        self.user_agents
            .choose(&mut rand::thread_rng())
            .map(String::as_str)
            .unwrap_or_default()
    }

    async fn attempt(&self, url: &Url) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .header(USER_AGENT, self.user_agent())
            .header(ACCEPT_LANGUAGE, &self.accept_language)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }

    fn is_retryable(&self, err: &FetchError) -> bool {
        match err {
            FetchError::Status { status, .. } => self.retry_statuses.contains(status),
            FetchError::Request(e) => e.is_connect() || e.is_timeout(),
            FetchError::InvalidUrl(_) => false,
        }
    }
}

#[async_trait]
impl PageSource for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let url = Url::parse(url)?;

        let delay = self.polite_delay();
        debug!("Waiting {:?} before fetching {}", delay, url);
        sleep(delay).await;

        let mut retries = 0;
        loop {
            match self.attempt(&url).await {
                Ok(body) => return Ok(body),
                Err(e) if retries < self.max_retries && self.is_retryable(&e) => {
                    retries += 1;
                    let delay = self.backoff(retries);
                    warn!(
                        "{}; retrying in {:?} (retry {}/{})",
                        e, delay, retries, self.max_retries
                    );
                    sleep(delay).await;
                }
                Err(e) => {
                    error!("Giving up on {}: {}", url, e);
                    return Err(e);
                }
            }
        }
    }
}
