//! Netgsm HTTP GET API

use async_trait::async_trait;

use guide_common::NetgsmConfig;
use guide_core::{PhoneNumber, SmsSender};

pub struct NetgsmSender {
    client: reqwest::Client,
    config: NetgsmConfig,
}

impl NetgsmSender {
    pub fn new(client: reqwest::Client, config: NetgsmConfig) -> Self {
        Self { client, config }
    }

    fn query<'a>(&'a self, to: &'a PhoneNumber, message: &'a str) -> [(&'static str, &'a str); 5] {
        [
            ("usercode", self.config.usercode.as_str()),
            ("password", self.config.password.as_str()),
            ("gsmno", to.as_str()),
            ("message", message),
            ("msgheader", self.config.sender.as_str()),
        ]
    }
}

/// Netgsm answers `00 <job id>` on success and an error code otherwise
fn is_accepted(body: &str) -> bool {
    body.trim_start().starts_with("00")
}

#[async_trait]
impl SmsSender for NetgsmSender {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn send(&self, to: &PhoneNumber, message: &str) -> bool {
        let response = match self
            .client
            .get(&self.config.api_url)
            .query(&self.query(to, message))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e.without_url(), "Netgsm request failed");
                return false;
            }
        };

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status.is_success() && is_accepted(&body) {
            tracing::info!(to = %to, "SMS sent");
            true
        } else {
            tracing::warn!(%status, body = %body.trim(), "Netgsm rejected the message");
            false
        }
    }
}
