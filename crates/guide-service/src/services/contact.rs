//! Contact form: notify the site admin and send the visitor an auto-reply

use tracing::{info, instrument, warn};

use guide_core::traits::OutgoingMail;

use crate::dto::{ContactRequest, MessageResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Escape text for inclusion in an HTML mail body
fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\n' => out.push_str("<br>"),
            _ => out.push(c),
        }
    }
    out
}

fn admin_notification(admin_address: String, request: &ContactRequest) -> OutgoingMail {
    let phone = request
        .phone
        .as_deref()
        .filter(|p| !p.trim().is_empty())
        .map(|p| format!("<p><strong>Phone:</strong> {}</p>", escape_html(p)))
        .unwrap_or_default();

    OutgoingMail {
        to: admin_address,
        to_name: None,
        subject: format!("Contact form: {}", request.subject),
        html_body: format!(
            "<h2>New contact form message</h2>\
             <p><strong>Name:</strong> {}</p>\
             <p><strong>Email:</strong> {}</p>{phone}\
             <p><strong>Subject:</strong> {}</p>\
             <blockquote>{}</blockquote>",
            escape_html(&request.name),
            escape_html(&request.email),
            escape_html(&request.subject),
            escape_html(&request.message),
        ),
        reply_to: Some(request.email.clone()),
    }
}

fn auto_reply(request: &ContactRequest) -> OutgoingMail {
    OutgoingMail {
        to: request.email.clone(),
        to_name: Some(request.name.clone()),
        subject: "We received your message".to_string(),
        html_body: format!(
            "<p>Hello {},</p>\
             <p>Thank you for contacting Alanya Business Guide. \
             We received your message about \"{}\" and will get back to you soon.</p>",
            escape_html(&request.name),
            escape_html(&request.subject),
        ),
        reply_to: None,
    }
}

pub struct ContactService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ContactService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Deliver a contact message; succeeds only if both mails go out
    #[instrument(skip(self, request), fields(subject = %request.subject))]
    pub async fn send(&self, request: ContactRequest) -> ServiceResult<MessageResponse> {
        let mailer = self.ctx.mailer();
        let Some(admin_address) = mailer.admin_address().filter(|_| mailer.is_enabled()) else {
            return Err(ServiceError::Unavailable("Mail delivery"));
        };

        if !mailer.send(&admin_notification(admin_address, &request)).await {
            return Err(ServiceError::upstream("Failed to deliver contact message"));
        }
        if !mailer.send(&auto_reply(&request)).await {
            warn!("Contact notification sent but auto-reply failed");
            return Err(ServiceError::upstream("Failed to send confirmation email"));
        }

        info!("Contact message delivered");
        Ok(MessageResponse::ok("Your message has been sent."))
    }
}
