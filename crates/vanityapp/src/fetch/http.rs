use super::{FetchResponse, Fetcher};
use crate::config::VanityConfig;
use crate::error::{Result, VanityError};
use std::time::Duration;

/// Production fetcher backed by a blocking `reqwest` client.
///
/// Redirects are followed; the reported URL is the one the body came from.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(config: &VanityConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| VanityError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn get(&self, url: &str) -> Result<FetchResponse> {
        tracing::debug!(%url, "GET");
        let response = self.client.get(url).send().map_err(|e| VanityError::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let final_url = response.url().to_string();
        let status = response.status().as_u16();
        let body = response.text().map_err(|e| VanityError::Fetch {
            url: final_url.clone(),
            reason: e.to_string(),
        })?;
        tracing::debug!(url = %final_url, status, bytes = body.len(), "response");

        Ok(FetchResponse::new(final_url, status, body))
    }
}
