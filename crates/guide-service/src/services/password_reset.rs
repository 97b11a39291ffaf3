//! Password reset by emailed link or by SMS code
//!
//! Both paths store a single-use secret in the token store with a TTL. The
//! new password is checked before the secret is touched. An SMS code is
//! consumed only by a matching attempt, so a wrong guess leaves it usable.
//! Requests for unknown accounts get the same acknowledgement as known ones.

use chrono::Utc;
use tracing::{info, instrument, warn};

use guide_common::{generate_numeric_code, generate_url_token, validate_password_strength};
use guide_core::entities::User;
use guide_core::traits::OutgoingMail;
use guide_core::value_objects::PhoneNumber;
use guide_core::DomainError;

use crate::dto::{
    ForgotPasswordRequest, ForgotPasswordSmsRequest, MessageResponse, ResetPasswordRequest,
    ResetPasswordSmsRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Entropy of emailed reset tokens
const RESET_TOKEN_BYTES: usize = 32;

const EMAIL_ACK: &str = "If the address is registered, a password reset link has been sent.";
const SMS_ACK: &str = "If the number is registered, a reset code has been sent.";

fn sms_key(phone: &PhoneNumber) -> String {
    format!("pwreset:sms:{phone}")
}

fn email_key(token: &str) -> String {
    format!("pwreset:email:{token}")
}

/// Text of the reset SMS
pub fn reset_code_message(code: &str) -> String {
    format!(
        "Alanya Business Guide - your password reset code: {code}. \
         Do not share this code with anyone."
    )
}

/// Password reset service
pub struct PasswordResetService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PasswordResetService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Mail a reset link to a registered address
    #[instrument(skip(self, request))]
    pub async fn request_email_reset(
        &self,
        request: ForgotPasswordRequest,
    ) -> ServiceResult<MessageResponse> {
        let mailer = self.ctx.mailer();
        if !mailer.is_enabled() {
            return Err(ServiceError::Unavailable("Mail delivery"));
        }

        let Some(user) = self
            .ctx
            .user_repo()
            .find_by_email(request.email.trim())
            .await?
        else {
            info!("Email reset requested for unknown address");
            return Ok(MessageResponse::ok(EMAIL_ACK));
        };

        if user.is_locked_out(Utc::now()) {
            warn!(user_id = user.id, "Email reset requested for locked account");
            return Ok(MessageResponse::ok(EMAIL_ACK));
        }

        let token = generate_url_token(RESET_TOKEN_BYTES);
        self.ctx
            .token_store()
            .put(
                &email_key(&token),
                &user.id.to_string(),
                self.ctx.settings().reset_token_ttl,
            )
            .await?;

        let link = format!(
            "{}/reset-password?user_id={}&token={}",
            self.ctx.settings().public_base_url,
            user.id,
            token
        );
        let mail = OutgoingMail {
            to: user.email.clone(),
            to_name: Some(user.display_label()),
            subject: "Password reset".to_string(),
            html_body: format!(
                "<p>Hello {},</p>\
                 <p>To reset your password, open the link below:</p>\
                 <p><a href=\"{link}\">{link}</a></p>\
                 <p>If you did not request this, you can ignore this email.</p>",
                user.display_label()
            ),
            reply_to: None,
        };

        if !mailer.send(&mail).await {
            self.ctx.token_store().remove(&email_key(&token)).await?;
            return Err(ServiceError::upstream("Failed to send password reset email"));
        }

        info!(user_id = user.id, "Password reset link sent");
        Ok(MessageResponse::ok(EMAIL_ACK))
    }

    /// Set a new password with an emailed token
    #[instrument(skip(self, request), fields(user_id = request.user_id))]
    pub async fn reset_with_email_token(
        &self,
        request: ResetPasswordRequest,
    ) -> ServiceResult<MessageResponse> {
        validate_password_strength(&request.new_password)?;

        let owner = self
            .ctx
            .token_store()
            .take(&email_key(&request.token))
            .await?
            .ok_or(DomainError::InvalidResetCode)?;

        if owner != request.user_id.to_string() {
            warn!("Reset token presented for a different user");
            return Err(DomainError::InvalidResetCode.into());
        }

        let user = self.find_resettable(request.user_id).await?;
        self.set_password(&user, &request.new_password).await?;

        Ok(MessageResponse::ok("Your password has been reset."))
    }

    /// Text a six-digit code to a registered phone number
    #[instrument(skip(self, request))]
    pub async fn request_sms_reset(
        &self,
        request: ForgotPasswordSmsRequest,
    ) -> ServiceResult<MessageResponse> {
        let sms = self.ctx.sms();
        if !sms.is_enabled() {
            return Err(ServiceError::Unavailable("SMS delivery"));
        }

        let phone = PhoneNumber::normalize(&request.phone_number)?;

        let Some(user) = self.ctx.user_repo().find_by_phone(&phone).await? else {
            info!("SMS reset requested for unknown number");
            return Ok(MessageResponse::ok(SMS_ACK));
        };

        if user.is_locked_out(Utc::now()) {
            warn!(user_id = user.id, "SMS reset requested for locked account");
            return Ok(MessageResponse::ok(SMS_ACK));
        }

        let code = generate_numeric_code();
        self.ctx
            .token_store()
            .put(&sms_key(&phone), &code, self.ctx.settings().reset_code_ttl)
            .await?;

        if !sms.send(&phone, &reset_code_message(&code)).await {
            self.ctx.token_store().remove(&sms_key(&phone)).await?;
            return Err(ServiceError::upstream("Failed to send reset code"));
        }

        info!(user_id = user.id, "Password reset code sent");
        Ok(MessageResponse::ok(SMS_ACK))
    }

    /// Set a new password with an SMS code; a code works once
    #[instrument(skip(self, request))]
    pub async fn reset_with_sms_code(
        &self,
        request: ResetPasswordSmsRequest,
    ) -> ServiceResult<MessageResponse> {
        let phone = PhoneNumber::normalize(&request.phone_number)?;
        validate_password_strength(&request.new_password)?;

        let consumed = self
            .ctx
            .token_store()
            .take_if_eq(&sms_key(&phone), request.code.trim())
            .await?;
        if !consumed {
            warn!("Invalid or expired SMS reset code presented");
            return Err(DomainError::InvalidResetCode.into());
        }

        let user = self
            .ctx
            .user_repo()
            .find_by_phone(&phone)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", phone.as_str()))?;
        let user = self.find_resettable(user.id).await?;
        self.set_password(&user, &request.new_password).await?;

        Ok(MessageResponse::ok("Your password has been reset."))
    }

    async fn find_resettable(&self, user_id: i64) -> ServiceResult<User> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id))?;

        if user.is_locked_out(Utc::now()) {
            return Err(DomainError::AccountLocked.into());
        }
        Ok(user)
    }

    async fn set_password(&self, user: &User, new_password: &str) -> ServiceResult<()> {
        let hash = self.ctx.password_service().hash_new(new_password)?;
        self.ctx.user_repo().update_password(user.id, &hash).await?;
        info!(user_id = user.id, "Password reset completed");
        Ok(())
    }
}
