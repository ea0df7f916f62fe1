use crate::config::HarvestConfig;
use crate::error::FetchError;
use reqwest::Response;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Check a user-supplied page URL before any request is made.
///
/// Only absolute `http://` and `https://` URLs with a host are accepted.
pub fn validate_url(url: &str) -> Result<Url, FetchError> {
    let invalid = || FetchError::InvalidUrl {
        url: url.to_string(),
    };

    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(invalid());
    }

    let parsed = Url::parse(url).map_err(|_| invalid())?;
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(invalid());
    }

    Ok(parsed)
}

/// HTTP client shared by the page fetch and the bulk fetch.
///
/// Cloning is cheap; the connection pool and configuration are shared.
#[derive(Debug, Clone)]
pub struct HarvestClient {
    http: reqwest::Client,
    config: Arc<HarvestConfig>,
}

impl HarvestClient {
    /// Build a client sending the configured User-Agent on every request
    pub fn new(config: HarvestConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &HarvestConfig {
        &self.config
    }

    /// Issue a GET bounded by `timeout`; the status is not checked here
    pub async fn get(&self, url: &str, timeout: Duration) -> Result<Response, FetchError> {
        ::log::trace!("GET {} (timeout {:?})", url, timeout);
        self.http
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| FetchError::transport(url, e))
    }
}
