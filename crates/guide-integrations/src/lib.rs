//! # guide-integrations
//!
//! Adapters for the outbound gateway traits declared in `guide-core`:
//!
//! - **SMS**: Netgsm (HTTP GET) and Twilio (form POST with basic auth)
//! - **Mail**: SMTP with STARTTLS through lettre
//! - **Chat model**: Gemini `generateContent`
//!
//! Every adapter has a disabled counterpart that is selected when its
//! configuration is absent, so startup never fails on missing credentials.

pub mod gemini;
pub mod http;
pub mod mail;
pub mod sms;

pub use gemini::{DisabledChatModel, GeminiClient, FALLBACK_REPLY};
pub use http::build_http_client;
pub use mail::{mailer_from_config, DisabledMailer, SmtpMailer, SmtpSetupError};
pub use sms::{sms_sender_from_config, DisabledSmsSender, NetgsmSender, TwilioSender};

use std::sync::Arc;

use guide_common::GeminiConfig;
use guide_core::ChatModel;

/// Select the Gemini client, or the disabled model when no key is configured
pub fn chat_model_from_config(
    config: Option<&GeminiConfig>,
    client: reqwest::Client,
) -> Arc<dyn ChatModel> {
    match config {
        Some(config) => {
            tracing::info!(model = %config.model, "AI assistant enabled");
            Arc::new(GeminiClient::new(client, config.clone()))
        }
        None => {
            tracing::warn!("GEMINI_API_KEY not set, AI assistant disabled");
            Arc::new(DisabledChatModel)
        }
    }
}
