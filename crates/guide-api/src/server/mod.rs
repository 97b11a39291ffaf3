//! Server setup and initialization
//!
//! Provides the application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use guide_cache::{MemoryTokenStore, RedisPool, RedisTokenStore};
use guide_common::{AppConfig, AppError, JwtService, RedisConfig};
use guide_core::TokenStore;
use guide_db::{
    create_pool, run_migrations, PgAdminLogRepository, PgBusinessRepository,
    PgCategoryRepository, PgFavoriteRepository, PgNewsRepository, PgReviewRepository,
    PgUserPhotoRepository, PgUserRepository,
};
use guide_integrations::{
    build_http_client, chat_model_from_config, mailer_from_config, sms_sender_from_config,
};
use guide_service::{ServiceContextBuilder, ServiceSettings};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::{apply_light_middleware, apply_middleware};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let api = apply_middleware(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;
    let health = apply_light_middleware(health_routes());

    Ok(api.merge(health).with_state(state))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = guide_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool)
            .await
            .map_err(|e| AppError::Database(format!("Migration failed: {e}")))?;
        info!("Database migrations applied");
    }

    let (redis_pool, token_store) = connect_token_store(config.redis.as_ref())?;

    let http_client = build_http_client(&config.http)
        .map_err(|e| AppError::Config(format!("HTTP client: {e}")))?;
    let sms = sms_sender_from_config(&config.sms, http_client.clone());
    let mailer = mailer_from_config(config.mail.as_ref());
    let chat_model = chat_model_from_config(config.gemini.as_ref(), http_client);

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    ));

    let mut builder = ServiceContextBuilder::new()
        .pool(pool.clone())
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .business_repo(Arc::new(PgBusinessRepository::new(pool.clone())))
        .review_repo(Arc::new(PgReviewRepository::new(pool.clone())))
        .category_repo(Arc::new(PgCategoryRepository::new(pool.clone())))
        .favorite_repo(Arc::new(PgFavoriteRepository::new(pool.clone())))
        .news_repo(Arc::new(PgNewsRepository::new(pool.clone())))
        .admin_log_repo(Arc::new(PgAdminLogRepository::new(pool.clone())))
        .user_photo_repo(Arc::new(PgUserPhotoRepository::new(pool)))
        .token_store(token_store)
        .sms(sms)
        .mailer(mailer)
        .chat_model(chat_model)
        .jwt_service(jwt_service)
        .settings(ServiceSettings::from(&config));

    if let Some(redis_pool) = redis_pool {
        builder = builder.redis_pool(redis_pool);
    }

    let service_context = builder
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// How often the in-process token store drops expired entries
const TOKEN_PURGE_INTERVAL: Duration = Duration::from_secs(60);

/// Reset codes and refresh sessions live in Redis when it is configured
fn connect_token_store(
    redis: Option<&RedisConfig>,
) -> Result<(Option<RedisPool>, Arc<dyn TokenStore>), AppError> {
    match redis {
        Some(redis_config) => {
            let redis_pool = RedisPool::from_config(redis_config)
                .map_err(|e| AppError::Cache(e.to_string()))?;
            info!("Redis token store configured");
            let store = Arc::new(RedisTokenStore::new(redis_pool.clone()));
            Ok((Some(redis_pool), store))
        }
        None => {
            warn!("REDIS_URL not set, using in-process token store");
            Ok((None, memory_token_store(TOKEN_PURGE_INTERVAL)))
        }
    }
}

/// In-process store with a background purge of unread expired entries
fn memory_token_store(purge_every: Duration) -> Arc<MemoryTokenStore> {
    let store = Arc::new(MemoryTokenStore::new());
    store.spawn_purge_task(purge_every);
    store
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    // Peer addresses feed the per-client rate limiter
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid API_HOST/API_PORT: {e}")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    run_server(app, addr).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
