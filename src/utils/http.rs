use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Client, ClientBuilder};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{Result, TrackerError};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36";

/// Client for product pages. Configured headers go out with every request.
pub fn create_client(headers: &HashMap<String, String>, timeout: Duration) -> Result<Client> {
    let mut header_map = HeaderMap::new();
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| TrackerError::Config(format!("invalid header name {:?}: {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| TrackerError::Config(format!("invalid value for header {}: {}", name.as_str(), e)))?;
        header_map.insert(name, value);
    }

    if !header_map.contains_key(USER_AGENT) {
        header_map.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
    }

    ClientBuilder::new()
        .default_headers(header_map)
        .cookie_store(true)
        .timeout(timeout)
        .build()
        .map_err(|e| TrackerError::Config(format!("failed to build HTTP client: {}", e)))
}

/// Plain client for the webhook, without the product page headers.
pub fn create_webhook_client(timeout: Duration) -> Result<Client> {
    ClientBuilder::new()
        .timeout(timeout)
        .build()
        .map_err(|e| TrackerError::Config(format!("failed to build HTTP client: {}", e)))
}

/// Single GET, no retries. Any non-2xx status is a fetch error.
pub async fn fetch_html(client: &Client, url: &str) -> Result<String> {
    let fetch_error = |reason: String| TrackerError::Fetch {
        url: url.to_string(),
        reason,
    };

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| fetch_error(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        warn!("HTTP error {}: {}", status, url);
        return Err(fetch_error(format!("HTTP status {}", status)));
    }

    let body = response.text().await.map_err(|e| fetch_error(e.to_string()))?;
    debug!("Fetched {} bytes from {}", body.len(), url);
    Ok(body)
}
