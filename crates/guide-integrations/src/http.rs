//! Shared outbound HTTP client

use std::time::Duration;

use guide_common::HttpClientConfig;

/// Build the client shared by every HTTP adapter
pub fn build_http_client(config: &HttpClientConfig) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(concat!("guide-api/", env!("CARGO_PKG_VERSION")))
        .build()
}
