// src/wiki/client.rs
use async_trait::async_trait;
use reqwest::header;
use std::time::Duration;

use crate::utils::config::WikiConfig;
use crate::utils::error::WikiError;

/// Raw document fetch. Implementations report a missing page as `NotFound` and any other
/// failure as a fetch/network error; callers never retry.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, WikiError>;
}

/// Fetches wiki pages over HTTP.
pub struct HttpFetcher {
    client: reqwest::Client,
    request_delay: Duration,
}

impl HttpFetcher {
    pub fn new(config: &WikiConfig) -> Result<Self, WikiError> {
        Ok(Self {
            client: build_wiki_client(config)?,
            request_delay: Duration::from_millis(config.request_delay_ms),
        })
    }
}

/// Creates a reqwest client configured for wiki interaction.
pub fn build_wiki_client(config: &WikiConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(30))
        .build()
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, WikiError> {
        if url.trim().is_empty() {
            return Err(WikiError::Fetch("Invalid URL".to_string()));
        }

        tracing::info!("Downloading document from: {}", url);

        // --- Basic Rate Limiting ---
        tokio::time::sleep(self.request_delay).await;

        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "text/html,application/xhtml+xml,*/*")
            .send()
            .await?; // Propagates reqwest::Error as WikiError::Network

        let status = response.status();
        if !status.is_success() {
            if status == reqwest::StatusCode::NOT_FOUND {
                tracing::warn!("Received 404 Not Found for URL: {}", url);
                return Err(WikiError::NotFound(url.to_string()));
            }
            tracing::error!("HTTP error status: {} for URL: {}", status, url);
            return Err(WikiError::Http(status));
        }

        let body = response.text().await?;
        tracing::debug!("Successfully downloaded {} bytes from {}", body.len(), url);

        Ok(body)
    }
}
