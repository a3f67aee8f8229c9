use crate::shared::error::CatalogError;
use crate::shared::security::{validate_payload_size, MAX_PAYLOAD_SIZE};
use crate::shared::Result;
use std::time::Duration;

/// Timeout and retry settings of the HTTP client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpSettings {
    pub timeout: Duration,
    /// Total attempts per request, at least one
    pub max_retries: u32,
    /// Fixed pause between attempts
    pub retry_delay: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            max_retries: 3,
            retry_delay: Duration::from_secs(2),
        }
    }
}

/// HttpFetcher downloads catalog payloads with bounded retry
///
/// Every failure after the last attempt surfaces as
/// `CatalogError::SourceUnavailable` naming the source being fetched.
pub struct HttpFetcher {
    client: reqwest::Client,
    settings: HttpSettings,
}

impl HttpFetcher {
    pub fn new(settings: HttpSettings) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("driverpack-catalog/{}", version);
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> HttpSettings {
        self.settings
    }

    /// Fetches `url` as raw bytes
    ///
    /// # Arguments
    /// * `source_name` - Label used in errors, e.g. "Dell"
    pub async fn fetch_bytes(&self, source_name: &str, url: &str) -> Result<Vec<u8>> {
        let attempts = self.settings.max_retries.max(1);
        let mut last_error = String::new();

        for attempt in 1..=attempts {
            match self.fetch_once(url).await {
                Ok(bytes) => return Ok(bytes),
                Err(e) => {
                    last_error = e.to_string();
                    if attempt < attempts {
                        tokio::time::sleep(self.settings.retry_delay).await;
                    }
                }
            }
        }

        Err(CatalogError::SourceUnavailable {
            source_name: source_name.to_string(),
            details: format!("{} after {} attempt(s): {}", url, attempts, last_error),
        }
        .into())
    }

    async fn fetch_once(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP {}", response.status());
        }
        if let Some(length) = response.content_length() {
            validate_payload_size(length, url, MAX_PAYLOAD_SIZE)?;
        }

        let bytes = response.bytes().await?;
        validate_payload_size(bytes.len() as u64, url, MAX_PAYLOAD_SIZE)?;
        Ok(bytes.to_vec())
    }
}
