//! # guide-common
//!
//! Shared utilities including configuration, error handling, authentication, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{
    constant_time_eq, generate_numeric_code, generate_url_token, hash_password,
    validate_password_strength, verify_password, Claims, JwtService, PasswordService, TokenPair,
    TokenType, MIN_PASSWORD_LEN,
};
pub use config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, GeminiConfig,
    HttpClientConfig, JwtConfig, MailConfig, MapsConfig, NetgsmConfig, PasswordResetConfig,
    RateLimitConfig, RedisConfig, ServerConfig, SmsConfig, SmsProvider, TwilioConfig,
};
pub use error::{AppError, AppResult};
pub use telemetry::{try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError};
