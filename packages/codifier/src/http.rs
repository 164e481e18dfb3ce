//! HTTP client for downloading source documents.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::DOWNLOAD_TIMEOUT_SECS;
use crate::error::{CodifierError, Result};

/// User agent identifying this tool. Some government document servers
/// reject requests without one.
const USER_AGENT: &str = concat!("lexcodify/", env!("CARGO_PKG_VERSION"));

/// Create a configured HTTP client.
///
/// # Returns
/// A `reqwest::blocking::Client` with the download timeout and user agent.
pub fn create_client() -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Download a URL's body.
///
/// Performs a single attempt, with one exception: when the failure is a TLS
/// certificate problem (common on older government document servers), the
/// request is retried exactly once with certificate verification disabled.
/// There is no other retry or backoff at this layer.
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `url` - URL to download from
///
/// # Returns
/// Raw bytes of the response body
pub fn download_bytes(client: &Client, url: &str) -> Result<Vec<u8>> {
    match try_download(client, url) {
        Ok(bytes) => Ok(bytes),
        Err(error) if is_certificate_error(&error) => {
            tracing::warn!(url, "TLS verification failed, retrying without verification");
            let insecure = Client::builder()
                .timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
                .user_agent(USER_AGENT)
                .danger_accept_invalid_certs(true)
                .build()?;
            try_download(&insecure, url)
        }
        Err(error) => Err(error),
    }
}

fn try_download(client: &Client, url: &str) -> Result<Vec<u8>> {
    let fetch_error = |source: reqwest::Error| CodifierError::Fetch {
        url: url.to_string(),
        source,
    };

    let response = client.get(url).send().map_err(fetch_error)?;
    let response = response.error_for_status().map_err(fetch_error)?;
    let bytes = response.bytes().map_err(fetch_error)?;
    Ok(bytes.to_vec())
}

/// Whether an error chain points at a TLS certificate problem.
fn is_certificate_error(error: &CodifierError) -> bool {
    let CodifierError::Fetch { source, .. } = error else {
        return false;
    };

    let mut current: Option<&(dyn std::error::Error + 'static)> = Some(source);
    while let Some(err) = current {
        let text = err.to_string();
        if text.contains("certificate") || text.contains("SSL") || text.contains("TLS") {
            return true;
        }
        current = err.source();
    }
    false
}
