//! Service context - dependency container for services
//!
//! Holds all repositories, the token store, outbound gateways and the
//! settings services read at request time.

use std::sync::Arc;
use std::time::Duration;

use guide_cache::{MemoryTokenStore, RedisPool};
use guide_common::{AppConfig, JwtService, PasswordService};
use guide_core::traits::{
    AdminLogRepository, BusinessRepository, CategoryRepository, ChatModel, FavoriteRepository,
    Mailer, NewsRepository, ReviewRepository, SmsSender, TokenStore, UserPhotoRepository,
    UserRepository,
};
use guide_db::PgPool;
use guide_integrations::{DisabledChatModel, DisabledMailer, DisabledSmsSender};

use super::error::{ServiceError, ServiceResult};

/// Runtime knobs used by the services
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    /// Base URL used to build links sent by mail
    pub public_base_url: String,
    /// Lifetime of an SMS reset code
    pub reset_code_ttl: Duration,
    /// Lifetime of an emailed reset token
    pub reset_token_ttl: Duration,
    pub google_maps_api_key: Option<String>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            public_base_url: "http://localhost:8080".to_string(),
            reset_code_ttl: Duration::from_secs(600),
            reset_token_ttl: Duration::from_secs(86_400),
            google_maps_api_key: None,
        }
    }
}

impl From<&AppConfig> for ServiceSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            public_base_url: config.app.public_base_url.trim_end_matches('/').to_string(),
            reset_code_ttl: Duration::from_secs(config.password_reset.code_ttl_secs),
            reset_token_ttl: Duration::from_secs(config.password_reset.token_ttl_secs),
            google_maps_api_key: config.maps.google_api_key.clone(),
        }
    }
}

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// The pools are optional so the same services run against in-memory
/// repositories in tests.
#[derive(Clone)]
pub struct ServiceContext {
    // Pools, used for readiness checks
    pool: Option<PgPool>,
    redis_pool: Option<RedisPool>,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    business_repo: Arc<dyn BusinessRepository>,
    review_repo: Arc<dyn ReviewRepository>,
    category_repo: Arc<dyn CategoryRepository>,
    favorite_repo: Arc<dyn FavoriteRepository>,
    news_repo: Arc<dyn NewsRepository>,
    admin_log_repo: Arc<dyn AdminLogRepository>,
    user_photo_repo: Arc<dyn UserPhotoRepository>,

    // Expiring keys: reset codes, reset tokens, refresh sessions
    token_store: Arc<dyn TokenStore>,

    // Gateways
    sms: Arc<dyn SmsSender>,
    mailer: Arc<dyn Mailer>,
    chat_model: Arc<dyn ChatModel>,

    jwt_service: Arc<JwtService>,
    password_service: PasswordService,
    settings: ServiceSettings,
}

impl ServiceContext {
    // === Pools ===

    /// Get the PostgreSQL pool, absent when running on in-memory repositories
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    /// Get the Redis pool, absent when Redis is not configured
    pub fn redis_pool(&self) -> Option<&RedisPool> {
        self.redis_pool.as_ref()
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn business_repo(&self) -> &dyn BusinessRepository {
        self.business_repo.as_ref()
    }

    pub fn review_repo(&self) -> &dyn ReviewRepository {
        self.review_repo.as_ref()
    }

    pub fn category_repo(&self) -> &dyn CategoryRepository {
        self.category_repo.as_ref()
    }

    pub fn favorite_repo(&self) -> &dyn FavoriteRepository {
        self.favorite_repo.as_ref()
    }

    pub fn news_repo(&self) -> &dyn NewsRepository {
        self.news_repo.as_ref()
    }

    pub fn admin_log_repo(&self) -> &dyn AdminLogRepository {
        self.admin_log_repo.as_ref()
    }

    pub fn user_photo_repo(&self) -> &dyn UserPhotoRepository {
        self.user_photo_repo.as_ref()
    }

    // === Stores and gateways ===

    /// Get the token store
    pub fn token_store(&self) -> &dyn TokenStore {
        self.token_store.as_ref()
    }

    /// Get the SMS sender
    pub fn sms(&self) -> &dyn SmsSender {
        self.sms.as_ref()
    }

    /// Get the mailer
    pub fn mailer(&self) -> &dyn Mailer {
        self.mailer.as_ref()
    }

    /// Get the language model behind the assistant
    pub fn chat_model(&self) -> &dyn ChatModel {
        self.chat_model.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the password service
    pub fn password_service(&self) -> &PasswordService {
        &self.password_service
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &self.pool.as_ref().map(|_| "PgPool"))
            .field("redis_pool", &self.redis_pool.as_ref().map(|_| "RedisPool"))
            .field("repositories", &"...")
            .field("sms_enabled", &self.sms.is_enabled())
            .field("mail_enabled", &self.mailer.is_enabled())
            .field("chat_enabled", &self.chat_model.is_enabled())
            .field("settings", &self.settings)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
///
/// Repositories and the JWT service are required. The token store defaults
/// to an in-memory store and every gateway defaults to its disabled variant.
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    redis_pool: Option<RedisPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    business_repo: Option<Arc<dyn BusinessRepository>>,
    review_repo: Option<Arc<dyn ReviewRepository>>,
    category_repo: Option<Arc<dyn CategoryRepository>>,
    favorite_repo: Option<Arc<dyn FavoriteRepository>>,
    news_repo: Option<Arc<dyn NewsRepository>>,
    admin_log_repo: Option<Arc<dyn AdminLogRepository>>,
    user_photo_repo: Option<Arc<dyn UserPhotoRepository>>,
    token_store: Option<Arc<dyn TokenStore>>,
    sms: Option<Arc<dyn SmsSender>>,
    mailer: Option<Arc<dyn Mailer>>,
    chat_model: Option<Arc<dyn ChatModel>>,
    jwt_service: Option<Arc<JwtService>>,
    settings: Option<ServiceSettings>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn redis_pool(mut self, redis_pool: RedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn business_repo(mut self, repo: Arc<dyn BusinessRepository>) -> Self {
        self.business_repo = Some(repo);
        self
    }

    pub fn review_repo(mut self, repo: Arc<dyn ReviewRepository>) -> Self {
        self.review_repo = Some(repo);
        self
    }

    pub fn category_repo(mut self, repo: Arc<dyn CategoryRepository>) -> Self {
        self.category_repo = Some(repo);
        self
    }

    pub fn favorite_repo(mut self, repo: Arc<dyn FavoriteRepository>) -> Self {
        self.favorite_repo = Some(repo);
        self
    }

    pub fn news_repo(mut self, repo: Arc<dyn NewsRepository>) -> Self {
        self.news_repo = Some(repo);
        self
    }

    pub fn admin_log_repo(mut self, repo: Arc<dyn AdminLogRepository>) -> Self {
        self.admin_log_repo = Some(repo);
        self
    }

    pub fn user_photo_repo(mut self, repo: Arc<dyn UserPhotoRepository>) -> Self {
        self.user_photo_repo = Some(repo);
        self
    }

    pub fn token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.token_store = Some(store);
        self
    }

    pub fn sms(mut self, sender: Arc<dyn SmsSender>) -> Self {
        self.sms = Some(sender);
        self
    }

    pub fn mailer(mut self, mailer: Arc<dyn Mailer>) -> Self {
        self.mailer = Some(mailer);
        self
    }

    pub fn chat_model(mut self, model: Arc<dyn ChatModel>) -> Self {
        self.chat_model = Some(model);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn settings(mut self, settings: ServiceSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            pool: self.pool,
            redis_pool: self.redis_pool,
            user_repo: self
                .user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            business_repo: self
                .business_repo
                .ok_or_else(|| ServiceError::validation("business_repo is required"))?,
            review_repo: self
                .review_repo
                .ok_or_else(|| ServiceError::validation("review_repo is required"))?,
            category_repo: self
                .category_repo
                .ok_or_else(|| ServiceError::validation("category_repo is required"))?,
            favorite_repo: self
                .favorite_repo
                .ok_or_else(|| ServiceError::validation("favorite_repo is required"))?,
            news_repo: self
                .news_repo
                .ok_or_else(|| ServiceError::validation("news_repo is required"))?,
            admin_log_repo: self
                .admin_log_repo
                .ok_or_else(|| ServiceError::validation("admin_log_repo is required"))?,
            user_photo_repo: self
                .user_photo_repo
                .ok_or_else(|| ServiceError::validation("user_photo_repo is required"))?,
            token_store: self
                .token_store
                .unwrap_or_else(|| Arc::new(MemoryTokenStore::new())),
            sms: self
                .sms
                .unwrap_or_else(|| Arc::new(DisabledSmsSender::new("not configured"))),
            mailer: self.mailer.unwrap_or_else(|| Arc::new(DisabledMailer)),
            chat_model: self.chat_model.unwrap_or_else(|| Arc::new(DisabledChatModel)),
            jwt_service: self
                .jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            password_service: PasswordService::new(),
            settings: self.settings.unwrap_or_default(),
        })
    }
}
