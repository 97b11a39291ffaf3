//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, GeminiConfig,
    HttpClientConfig, JwtConfig, MailConfig, MapsConfig, NetgsmConfig, PasswordResetConfig,
    RateLimitConfig, RedisConfig, ServerConfig, SmsConfig, SmsProvider, TwilioConfig,
};
