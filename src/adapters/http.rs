use crate::domain::ports::Fetcher;
use crate::utils::error::{PortalError, Result};
use async_trait::async_trait;
use reqwest::Client;

/// `Fetcher` backed by a shared `reqwest::Client`. No timeout is set, so
/// requests run under the transport defaults.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!(
                "{}/{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!("Making API request to: {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .inspect_err(|e| tracing::debug!("Transport error: {:?}", e))?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(PortalError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}
