//! Mail delivery

mod disabled;
mod smtp;

pub use disabled::DisabledMailer;
pub use smtp::{SmtpMailer, SmtpSetupError};

use std::sync::Arc;

use guide_common::MailConfig;
use guide_core::Mailer;

/// Build the SMTP mailer, or the disabled one when `SMTP_HOST` is unset or
/// the transport cannot be configured
pub fn mailer_from_config(config: Option<&MailConfig>) -> Arc<dyn Mailer> {
    let Some(config) = config else {
        tracing::warn!("SMTP_HOST not set, mail disabled");
        return Arc::new(DisabledMailer);
    };

    match SmtpMailer::new(config) {
        Ok(mailer) => {
            tracing::info!(host = %config.host, port = config.port, "Mail enabled");
            Arc::new(mailer)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Invalid SMTP configuration, mail disabled");
            Arc::new(DisabledMailer)
        }
    }
}
