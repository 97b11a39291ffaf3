use async_trait::async_trait;

use guide_core::{Mailer, OutgoingMail};

/// Mailer used when SMTP is not configured
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    fn is_enabled(&self) -> bool {
        false
    }

    fn admin_address(&self) -> Option<String> {
        None
    }

    async fn send(&self, mail: &OutgoingMail) -> bool {
        tracing::warn!(subject = %mail.subject, "Mail not sent, SMTP disabled");
        false
    }
}
