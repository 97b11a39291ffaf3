//! SMS senders

mod disabled;
mod netgsm;
mod twilio;

pub use disabled::DisabledSmsSender;
pub use netgsm::NetgsmSender;
pub use twilio::TwilioSender;

use std::sync::Arc;

use guide_common::{SmsConfig, SmsProvider};
use guide_core::SmsSender;

/// Select the configured provider, falling back to a disabled sender when
/// the provider is unknown or its credentials are missing
pub fn sms_sender_from_config(config: &SmsConfig, client: reqwest::Client) -> Arc<dyn SmsSender> {
    match (config.provider, &config.netgsm, &config.twilio) {
        (SmsProvider::Netgsm, Some(netgsm), _) => {
            tracing::info!(provider = "netgsm", "SMS enabled");
            Arc::new(NetgsmSender::new(client, netgsm.clone()))
        }
        (SmsProvider::Twilio, _, Some(twilio)) => {
            tracing::info!(provider = "twilio", "SMS enabled");
            Arc::new(TwilioSender::new(client, twilio.clone()))
        }
        (SmsProvider::Unsupported, _, _) => {
            tracing::warn!("Unknown SMS_PROVIDER, SMS disabled");
            Arc::new(DisabledSmsSender::new("unknown provider"))
        }
        (provider, _, _) => {
            tracing::warn!(?provider, "SMS credentials not configured, SMS disabled");
            Arc::new(DisabledSmsSender::new("missing credentials"))
        }
    }
}
