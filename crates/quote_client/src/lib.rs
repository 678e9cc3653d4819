use std::time::Duration;

use reqwest::{header, Client};
use serde::Deserialize;
use shared::{domain::Quote, error::FetchError};
use tracing::{info, warn};

pub mod connectivity;

pub use connectivity::{AlwaysOnline, Connectivity, TcpProbe};

/// ZenQuotes random-quote endpoint: returns a JSON array whose first
/// element carries the quote under `q` and the author under `a`.
pub const DEFAULT_API_URL: &str = "https://zenquotes.io/api/random";
pub const DEFAULT_USER_AGENT: &str = "WinQuote-CLI/1.0";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 2;

#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub api_url: String,
    pub user_agent: String,
    /// Per-attempt timeout; applies to each retry independently.
    pub request_timeout: Duration,
    /// Extra attempts after the first, taken only on transport failure.
    pub retry_attempts: u32,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
        }
    }
}

// External contract: ZenQuotes field names.
#[derive(Debug, Deserialize)]
struct ApiQuote {
    #[serde(default, rename = "q")]
    text: String,
    #[serde(default, rename = "a")]
    author: String,
}

/// Fetches one random quote from the remote API.
///
/// The retry policy is internal: callers see only the final success or the
/// final failure. Nothing outside the network call is touched.
pub struct QuoteFetcher {
    http: Client,
    config: FetcherConfig,
    connectivity: Box<dyn Connectivity>,
}

impl QuoteFetcher {
    pub fn new(
        config: FetcherConfig,
        connectivity: Box<dyn Connectivity>,
    ) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|error| FetchError::Transport(format!("failed to build client: {error}")))?;
        Ok(Self {
            http,
            config,
            connectivity,
        })
    }

    /// One logical fetch: reachability precheck, then up to
    /// `1 + retry_attempts` HTTP attempts. Only transport failures retry;
    /// a well-formed HTTP exchange with bad content fails immediately.
    pub async fn fetch(&self) -> Result<Quote, FetchError> {
        if !self.connectivity.is_online() {
            warn!("quote fetch skipped: no network connection");
            return Err(FetchError::NoConnection);
        }

        let mut last_detail = String::new();
        for attempt in 0..=self.config.retry_attempts {
            if attempt > 0 {
                info!(attempt, url = %self.config.api_url, "retrying quote fetch");
            }
            match self.fetch_once().await {
                Ok(quote) => {
                    info!(author = %quote.author, "quote fetched");
                    return Ok(quote);
                }
                Err(FetchError::Transport(detail)) => {
                    warn!(attempt, %detail, "quote fetch transport failure");
                    last_detail = detail;
                }
                Err(other) => return Err(other),
            }
        }
        Err(FetchError::Transport(last_detail))
    }

    async fn fetch_once(&self) -> Result<Quote, FetchError> {
        let response = self
            .http
            .get(&self.config.api_url)
            .header(header::USER_AGENT, &self.config.user_agent)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport_detail)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Transport(format!("HTTP {status}")));
        }

        let quotes: Vec<ApiQuote> = response
            .json()
            .await
            .map_err(|error| FetchError::Transport(format!("malformed response body: {error}")))?;

        let Some(first) = quotes.into_iter().next() else {
            return Err(FetchError::EmptyResponse);
        };

        let quote = Quote::new(first.text, first.author);
        if !quote.is_valid() {
            return Err(FetchError::InvalidData);
        }
        Ok(quote)
    }
}

fn transport_detail(error: reqwest::Error) -> FetchError {
    match error.status() {
        Some(status) => FetchError::Transport(format!("HTTP {status}")),
        None => FetchError::Transport(error.to_string()),
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
