//! Authentication service
//!
//! Handles registration (users and business owners), login, token refresh,
//! logout and password changes.

use std::time::Duration;

use chrono::Utc;
use tracing::{info, instrument, warn};

use guide_common::AppError;
use guide_core::entities::{BusinessOrigin, NewBusiness, NewUser, User};
use guide_core::value_objects::{PhoneNumber, Roles};
use guide_core::DomainError;

use crate::dto::{
    AuthResponse, BusinessRegistrationResponse, BusinessResponse, ChangePasswordRequest,
    CurrentUserResponse, LoginRequest, LogoutRequest, RefreshTokenRequest,
    RegisterBusinessRequest, RegisterRequest,
};

use super::access::{ensure_category, load_actor};
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Token store key for an issued refresh token
pub(crate) fn refresh_key(jti: &str) -> String {
    format!("refresh:{jti}")
}

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        if !request.consent_accepted {
            return Err(DomainError::ConsentRequired.into());
        }

        let phone_number = request
            .phone_number
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(PhoneNumber::normalize)
            .transpose()?;

        let user = self
            .create_account(NewUser {
                email: request.email.trim().to_string(),
                full_name: request.full_name.trim().to_string(),
                phone_number,
                roles: Roles::USER,
                consent_accepted: true,
                password_hash: self.ctx.password_service().hash_new(&request.password)?,
            })
            .await?;

        info!(user_id = user.id, "User registered successfully");

        self.issue_tokens(&user).await
    }

    /// Register a business owner together with their first business
    ///
    /// The business starts pending and becomes public once an admin approves it.
    #[instrument(
        skip(self, request),
        fields(email = %request.email, business = %request.business_name)
    )]
    pub async fn register_business_owner(
        &self,
        request: RegisterBusinessRequest,
    ) -> ServiceResult<BusinessRegistrationResponse> {
        if !request.consent_accepted {
            return Err(DomainError::ConsentRequired.into());
        }
        ensure_category(self.ctx, request.category_id).await?;

        let business_name = request.business_name.trim().to_string();
        let user = self
            .create_account(NewUser {
                email: request.email.trim().to_string(),
                full_name: format!("{business_name} Owner"),
                phone_number: PhoneNumber::normalize(&request.phone).ok(),
                roles: Roles::BUSINESS_OWNER,
                consent_accepted: true,
                password_hash: self.ctx.password_service().hash_new(&request.password)?,
            })
            .await?;

        let business = self
            .ctx
            .business_repo()
            .create(&NewBusiness {
                name: business_name,
                description: request.description,
                address: request.address.trim().to_string(),
                phone: request.phone.trim().to_string(),
                email: Some(user.email.clone()),
                website: None,
                image_url: None,
                working_hours: None,
                price_range: None,
                category_id: request.category_id,
                owner_id: Some(user.id),
                created_by: Some(user.id),
                is_featured: false,
                location: None,
                origin: BusinessOrigin::Owner,
            })
            .await
            .inspect_err(|e| {
                warn!(
                    user_id = user.id,
                    error = %e,
                    "Owner account created but business insert failed"
                );
            })?;

        info!(user_id = user.id, business_id = business.id, "Business owner registered");

        Ok(BusinessRegistrationResponse {
            auth: self.issue_tokens(&user).await?,
            business: BusinessResponse::from(&business),
        })
    }

    /// Login with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_email(request.email.trim())
            .await?
            .ok_or_else(|| {
                warn!("Login failed: user not found");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidCredentials))?;

        self.ctx
            .password_service()
            .verify_or_error(&request.password, &password_hash)
            .inspect_err(|_| warn!(user_id = user.id, "Login failed: invalid password"))?;

        if user.is_locked_out(Utc::now()) {
            warn!(user_id = user.id, "Login refused: account locked");
            return Err(DomainError::AccountLocked.into());
        }

        info!(user_id = user.id, "User logged in successfully");

        self.issue_tokens(&user).await
    }

    /// Exchange a refresh token for a new pair; the old one stops working
    #[instrument(skip(self, request))]
    pub async fn refresh_tokens(
        &self,
        request: RefreshTokenRequest,
    ) -> ServiceResult<AuthResponse> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_refresh_token(&request.refresh_token)?;
        let user_id = claims.user_id()?;

        let stored = self
            .ctx
            .token_store()
            .take(&refresh_key(&claims.jti))
            .await?
            .ok_or(ServiceError::App(AppError::InvalidToken))?;

        if stored != user_id.to_string() {
            warn!(user_id, "Refresh token does not belong to its subject");
            return Err(AppError::InvalidToken.into());
        }

        let user = load_actor(self.ctx, user_id).await?;

        self.issue_tokens(&user).await
    }

    /// Revoke a refresh token owned by the user
    #[instrument(skip(self, request))]
    pub async fn logout(&self, user_id: i64, request: LogoutRequest) -> ServiceResult<()> {
        let Some(token) = request.refresh_token else {
            return Ok(());
        };

        let claims = self.ctx.jwt_service().validate_refresh_token(&token)?;
        if claims.user_id()? != user_id {
            return Err(AppError::InvalidToken.into());
        }

        self.ctx
            .token_store()
            .remove(&refresh_key(&claims.jti))
            .await?;

        info!(user_id, "User logged out");
        Ok(())
    }

    /// Change the password of a signed-in user
    #[instrument(skip(self, request))]
    pub async fn change_password(
        &self,
        user_id: i64,
        request: ChangePasswordRequest,
    ) -> ServiceResult<()> {
        let hash = self
            .ctx
            .user_repo()
            .get_password_hash(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id))?;

        self.ctx
            .password_service()
            .verify_or_error(&request.current_password, &hash)
            .map_err(|_| ServiceError::validation("Current password is incorrect"))?;

        let new_hash = self.ctx.password_service().hash_new(&request.new_password)?;
        self.ctx
            .user_repo()
            .update_password(user_id, &new_hash)
            .await?;

        info!(user_id, "Password changed");
        Ok(())
    }

    async fn create_account(&self, new_user: NewUser) -> ServiceResult<User> {
        if self.ctx.user_repo().email_exists(&new_user.email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }
        Ok(self.ctx.user_repo().create(&new_user).await?)
    }

    /// Issue a token pair and record the refresh token for rotation
    async fn issue_tokens(&self, user: &User) -> ServiceResult<AuthResponse> {
        let jwt = self.ctx.jwt_service();
        let pair = jwt.generate_token_pair(user.id, user.roles)?;

        let ttl = Duration::from_secs(u64::try_from(jwt.refresh_token_expiry()).unwrap_or(0));
        self.ctx
            .token_store()
            .put(&refresh_key(&pair.refresh_id), &user.id.to_string(), ttl)
            .await?;

        Ok(AuthResponse::new(
            pair.access_token,
            pair.refresh_token,
            pair.expires_in,
            CurrentUserResponse::from(user),
        ))
    }
}
