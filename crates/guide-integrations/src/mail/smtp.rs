//! SMTP mailer over STARTTLS, or implicit TLS on port 465

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use guide_common::MailConfig;
use guide_core::{Mailer, OutgoingMail};

const IMPLICIT_TLS_PORT: u16 = 465;

#[derive(Debug, thiserror::Error)]
pub enum SmtpSetupError {
    #[error("invalid SMTP relay: {0}")]
    Relay(#[from] lettre::transport::smtp::Error),

    #[error("invalid from address: {0}")]
    FromAddress(#[from] lettre::address::AddressError),
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    admin_address: String,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig) -> Result<Self, SmtpSetupError> {
        let builder = if config.port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
        };

        let builder = match (&config.username, &config.password) {
            (Some(user), Some(password)) => {
                builder.credentials(Credentials::new(user.clone(), password.clone()))
            }
            _ => builder,
        };

        let from = Mailbox::new(
            Some(config.from_name.clone()),
            config.from_address.parse::<Address>()?,
        );

        Ok(Self {
            transport: builder.port(config.port).build(),
            from,
            admin_address: config.admin_address.clone(),
        })
    }

    fn build_message(&self, mail: &OutgoingMail) -> Option<Message> {
        let to = match mail.to.parse::<Address>() {
            Ok(address) => Mailbox::new(mail.to_name.clone(), address),
            Err(e) => {
                tracing::warn!(error = %e, "Invalid recipient address");
                return None;
            }
        };

        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(mail.subject.as_str())
            .header(ContentType::TEXT_HTML);

        if let Some(reply_to) = mail.reply_to.as_deref() {
            match reply_to.parse::<Address>() {
                Ok(address) => builder = builder.reply_to(Mailbox::new(None, address)),
                Err(e) => tracing::debug!(error = %e, "Ignoring invalid reply-to address"),
            }
        }

        builder
            .body(mail.html_body.clone())
            .map_err(|e| tracing::warn!(error = %e, "Failed to build mail"))
            .ok()
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    fn is_enabled(&self) -> bool {
        true
    }

    fn admin_address(&self) -> Option<String> {
        Some(self.admin_address.clone())
    }

    async fn send(&self, mail: &OutgoingMail) -> bool {
        let Some(message) = self.build_message(mail) else {
            return false;
        };

        match self.transport.send(message).await {
            Ok(_) => {
                tracing::info!(subject = %mail.subject, "Mail sent");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, subject = %mail.subject, "Mail delivery failed");
                false
            }
        }
    }
}
