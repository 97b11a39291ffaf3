//! Twilio Messages API

use async_trait::async_trait;

use guide_common::TwilioConfig;
use guide_core::{PhoneNumber, SmsSender};

pub struct TwilioSender {
    client: reqwest::Client,
    config: TwilioConfig,
}

impl TwilioSender {
    pub fn new(client: reqwest::Client, config: TwilioConfig) -> Self {
        Self { client, config }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.api_base.trim_end_matches('/'),
            self.config.account_sid
        )
    }

    fn form(&self, to: &PhoneNumber, message: &str) -> [(&'static str, String); 3] {
        [
            ("From", self.config.from_number.clone()),
            ("To", format!("+{to}")),
            ("Body", message.to_string()),
        ]
    }
}

#[async_trait]
impl SmsSender for TwilioSender {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn send(&self, to: &PhoneNumber, message: &str) -> bool {
        let result = self
            .client
            .post(self.endpoint())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&self.form(to, message))
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                tracing::info!(to = %to, "SMS sent");
                true
            }
            Ok(response) => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                tracing::warn!(%status, body = %body, "Twilio rejected the message");
                false
            }
            Err(e) => {
                tracing::error!(error = %e.without_url(), "Twilio request failed");
                false
            }
        }
    }
}
