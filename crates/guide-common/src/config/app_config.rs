//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when present).
//! External integrations are optional: a missing key leaves the section empty and
//! the feature reports itself as disabled at runtime.

use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    /// `None` selects the in-process token store
    pub redis: Option<RedisConfig>,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub password_reset: PasswordResetConfig,
    pub mail: Option<MailConfig>,
    pub sms: SmsConfig,
    pub gemini: Option<GeminiConfig>,
    pub maps: MapsConfig,
    pub http: HttpClientConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
    /// Base URL used to build links in outgoing mail
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default = "default_redis_max_connections")]
    pub max_connections: u32,
}

/// JWT configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry: i64,
    #[serde(default = "default_refresh_token_expiry")]
    pub refresh_token_expiry: i64,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Lifetimes of password reset secrets
#[derive(Debug, Clone, Deserialize)]
pub struct PasswordResetConfig {
    /// SMS code lifetime
    #[serde(default = "default_reset_code_ttl")]
    pub code_ttl_secs: u64,
    /// Emailed token lifetime
    #[serde(default = "default_reset_token_ttl")]
    pub token_ttl_secs: u64,
}

impl Default for PasswordResetConfig {
    fn default() -> Self {
        Self {
            code_ttl_secs: default_reset_code_ttl(),
            token_ttl_secs: default_reset_token_ttl(),
        }
    }
}

/// SMTP mail configuration; present only when `SMTP_HOST` is set
#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    #[serde(default = "default_from_address")]
    pub from_address: String,
    #[serde(default = "default_from_name")]
    pub from_name: String,
    /// Receives contact-form notifications
    pub admin_address: String,
}

/// SMS provider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SmsProvider {
    #[default]
    Netgsm,
    Twilio,
    #[serde(other)]
    Unsupported,
}

impl SmsProvider {
    fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "netgsm" => Self::Netgsm,
            "twilio" => Self::Twilio,
            _ => Self::Unsupported,
        }
    }
}

/// SMS configuration; credentials of the selected provider may be absent
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SmsConfig {
    #[serde(default)]
    pub provider: SmsProvider,
    pub netgsm: Option<NetgsmConfig>,
    pub twilio: Option<TwilioConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NetgsmConfig {
    pub usercode: String,
    pub password: String,
    #[serde(default = "default_netgsm_sender")]
    pub sender: String,
    #[serde(default = "default_netgsm_api_url")]
    pub api_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
    #[serde(default = "default_twilio_api_base")]
    pub api_base: String,
}

/// Gemini configuration; present only when `GEMINI_API_KEY` is set
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    pub api_key: String,
    #[serde(default = "default_gemini_model")]
    pub model: String,
    #[serde(default = "default_gemini_api_base")]
    pub api_base: String,
}

/// Map provider configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct MapsConfig {
    pub google_api_key: Option<String>,
}

/// Outbound HTTP client settings
#[derive(Debug, Clone, Deserialize)]
pub struct HttpClientConfig {
    #[serde(default = "default_http_timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_http_timeout(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "business-guide".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_public_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_true() -> bool {
    true
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    2
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_access_token_expiry() -> i64 {
    900 // 15 minutes
}

fn default_refresh_token_expiry() -> i64 {
    604800 // 7 days
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn default_reset_code_ttl() -> u64 {
    600 // 10 minutes
}

fn default_reset_token_ttl() -> u64 {
    86400 // 24 hours
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_address() -> String {
    "noreply@plafind.com".to_string()
}

fn default_from_name() -> String {
    "Alanya Business Guide".to_string()
}

fn default_netgsm_sender() -> String {
    "ALANYA".to_string()
}

fn default_netgsm_api_url() -> String {
    "https://api.netgsm.com.tr/sms/send/get".to_string()
}

fn default_twilio_api_base() -> String {
    "https://api.twilio.com".to_string()
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_gemini_api_base() -> String {
    "https://generativelanguage.googleapis.com/v1".to_string()
}

fn default_http_timeout() -> u64 {
    30
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from any variable source
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let app = AppSettings {
            name: var("APP_NAME").unwrap_or_else(default_app_name),
            env: var("APP_ENV")
                .and_then(|s| Environment::parse(&s))
                .unwrap_or_default(),
            public_base_url: var("PUBLIC_BASE_URL")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or_else(default_public_base_url),
        };

        let api = ServerConfig {
            host: var("API_HOST").unwrap_or_else(default_host),
            port: parse_var(&var, "API_PORT")?.unwrap_or_else(default_port),
        };

        let database = DatabaseConfig {
            url: var("DATABASE_URL").ok_or(ConfigError::MissingVar("DATABASE_URL"))?,
            max_connections: parse_var(&var, "DATABASE_MAX_CONNECTIONS")?
                .unwrap_or_else(default_max_connections),
            min_connections: parse_var(&var, "DATABASE_MIN_CONNECTIONS")?
                .unwrap_or_else(default_min_connections),
            run_migrations: parse_var(&var, "DATABASE_RUN_MIGRATIONS")?
                .unwrap_or_else(default_true),
        };

        let redis = match var("REDIS_URL") {
            Some(url) => Some(RedisConfig {
                url,
                max_connections: parse_var(&var, "REDIS_MAX_CONNECTIONS")?
                    .unwrap_or_else(default_redis_max_connections),
            }),
            None => None,
        };

        let jwt = JwtConfig {
            secret: var("JWT_SECRET").ok_or(ConfigError::MissingVar("JWT_SECRET"))?,
            access_token_expiry: parse_var(&var, "JWT_ACCESS_TOKEN_EXPIRY")?
                .unwrap_or_else(default_access_token_expiry),
            refresh_token_expiry: parse_var(&var, "JWT_REFRESH_TOKEN_EXPIRY")?
                .unwrap_or_else(default_refresh_token_expiry),
        };

        let rate_limit = RateLimitConfig {
            requests_per_second: parse_var(&var, "RATE_LIMIT_REQUESTS_PER_SECOND")?
                .unwrap_or_else(default_requests_per_second),
            burst: parse_var(&var, "RATE_LIMIT_BURST")?.unwrap_or_else(default_burst),
        };

        let cors = CorsConfig {
            allowed_origins: var("CORS_ALLOWED_ORIGINS")
                .map(|s| {
                    s.split(',')
                        .map(str::trim)
                        .filter(|o| !o.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
        };

        let password_reset = PasswordResetConfig {
            code_ttl_secs: parse_var(&var, "PASSWORD_RESET_CODE_TTL_SECS")?
                .unwrap_or_else(default_reset_code_ttl),
            token_ttl_secs: parse_var(&var, "PASSWORD_RESET_TOKEN_TTL_SECS")?
                .unwrap_or_else(default_reset_token_ttl),
        };

        let mail = match var("SMTP_HOST") {
            Some(host) => {
                let from_address = var("MAIL_FROM_ADDRESS").unwrap_or_else(default_from_address);
                Some(MailConfig {
                    host,
                    port: parse_var(&var, "SMTP_PORT")?.unwrap_or_else(default_smtp_port),
                    username: var("SMTP_USERNAME"),
                    // App passwords are often pasted with grouping spaces
                    password: var("SMTP_PASSWORD").map(|p| p.replace(' ', "")),
                    admin_address: var("MAIL_ADMIN_ADDRESS")
                        .unwrap_or_else(|| from_address.clone()),
                    from_address,
                    from_name: var("MAIL_FROM_NAME").unwrap_or_else(default_from_name),
                })
            }
            None => None,
        };

        let sms = SmsConfig {
            provider: var("SMS_PROVIDER")
                .map(|s| SmsProvider::parse(&s))
                .unwrap_or_default(),
            netgsm: match (var("NETGSM_USERCODE"), var("NETGSM_PASSWORD")) {
                (Some(usercode), Some(password)) => Some(NetgsmConfig {
                    usercode,
                    password,
                    sender: var("NETGSM_SENDER").unwrap_or_else(default_netgsm_sender),
                    api_url: var("NETGSM_API_URL").unwrap_or_else(default_netgsm_api_url),
                }),
                _ => None,
            },
            twilio: match (
                var("TWILIO_ACCOUNT_SID"),
                var("TWILIO_AUTH_TOKEN"),
                var("TWILIO_FROM_NUMBER"),
            ) {
                (Some(account_sid), Some(auth_token), Some(from_number)) => Some(TwilioConfig {
                    account_sid,
                    auth_token,
                    from_number,
                    api_base: var("TWILIO_API_BASE").unwrap_or_else(default_twilio_api_base),
                }),
                _ => None,
            },
        };

        let gemini = var("GEMINI_API_KEY").map(|api_key| GeminiConfig {
            api_key,
            model: var("GEMINI_MODEL").unwrap_or_else(default_gemini_model),
            api_base: var("GEMINI_API_BASE")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or_else(default_gemini_api_base),
        });

        let maps = MapsConfig {
            google_api_key: var("GOOGLE_MAPS_API_KEY"),
        };

        let http = HttpClientConfig {
            timeout_secs: parse_var(&var, "EXTERNAL_HTTP_TIMEOUT_SECS")?
                .unwrap_or_else(default_http_timeout),
        };

        Ok(Self {
            app,
            api,
            database,
            redis,
            jwt,
            rate_limit,
            cors,
            password_reset,
            mail,
            sms,
            gemini,
            maps,
            http,
        })
    }
}

fn parse_var<T, F>(var: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    var(name)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(name, value.clone()))
        })
        .transpose()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
