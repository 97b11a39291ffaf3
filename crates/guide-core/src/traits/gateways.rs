//! Outbound gateways: SMS, mail and the language model behind the AI assistant
//!
//! Each gateway may be disabled when its credentials are not configured;
//! callers check `is_enabled` and report the feature as unavailable.

use async_trait::async_trait;
use thiserror::Error;

use crate::value_objects::PhoneNumber;

/// Errors from outbound calls that return content
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{0} is not configured")]
    Disabled(&'static str),

    #[error("Upstream request failed: {0}")]
    Upstream(String),
}

#[async_trait]
pub trait SmsSender: Send + Sync {
    fn is_enabled(&self) -> bool;

    /// Deliver a text message; `false` on any failure
    async fn send(&self, to: &PhoneNumber, message: &str) -> bool;
}

/// A mail to deliver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub to_name: Option<String>,
    pub subject: String,
    pub html_body: String,
    pub reply_to: Option<String>,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    fn is_enabled(&self) -> bool;

    /// Address that receives contact-form notifications
    fn admin_address(&self) -> Option<String>;

    /// Deliver a mail; `false` on any failure
    async fn send(&self, mail: &OutgoingMail) -> bool;
}

#[async_trait]
pub trait ChatModel: Send + Sync {
    fn is_enabled(&self) -> bool;

    /// Produce a completion for a fully assembled prompt
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError>;
}
