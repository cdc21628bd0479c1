//! Yahoo Finance REST client.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

use super::constants::{DEFAULT_TIMEOUT, REST_HOST, USER_AGENT};
use crate::error::DatafeedError;

/// Raw response of a REST call: HTTP status and body text
#[derive(Debug, Clone)]
pub struct RestResponse {
    pub status: u16,
    pub text: String,
}

impl RestResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// REST API client for Yahoo Finance
#[derive(Debug, Clone)]
pub struct YahooRestClient {
    /// HTTP client
    client: Client,
    /// Base URL
    host: String,
}

impl YahooRestClient {
    /// Create a new REST client against `host`
    pub fn new(host: &str, timeout_secs: u64) -> Result<Self, DatafeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| DatafeedError::Network(format!("failed to create HTTP client: {}", e)))?;

        let host = if host.is_empty() { REST_HOST } else { host };

        Ok(Self {
            client,
            host: host.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL of the client
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Build the full URL for a path
    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.host, path)
    }

    /// GET request returning the status and body.
    ///
    /// Non-2xx statuses are returned, not raised; the chart API reports unknown
    /// symbols in the body of a 404.
    pub async fn get(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<RestResponse, DatafeedError> {
        let url = self.build_url(path);
        debug!("Yahoo API request: GET {} {:?}", url, params);

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| DatafeedError::Network(format!("request failed: {}", e)))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| DatafeedError::Network(format!("failed to read response: {}", e)))?;

        if !(200..300).contains(&status) {
            warn!("Yahoo API error {}: {}", status, text);
        }

        Ok(RestResponse { status, text })
    }
}

impl Default for YahooRestClient {
    fn default() -> Self {
        Self {
            client: Client::new(),
            host: REST_HOST.to_string(),
        }
    }
}

/// Timeout used when the setting is missing or not positive
pub(crate) fn timeout_or_default(timeout: Option<i64>) -> u64 {
    match timeout {
        Some(t) if t > 0 => t as u64,
        _ => DEFAULT_TIMEOUT,
    }
}
