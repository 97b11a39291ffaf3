//! Route definitions
//!
//! Business API under /api/v1, the assistant at /api/ai/chat, health at the root.

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::handlers::{
    admin, ai, auth, businesses, contact, directory, health, news, owner, reviews, users,
};
use crate::state::AppState;

/// Create the rate-limited API router (health is mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", api_v1_routes())
        .route("/api/ai/chat", post(ai::chat))
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(public_routes())
        .merge(business_routes())
        .merge(auth_routes())
        .merge(user_routes())
        .merge(owner_routes())
        .merge(admin_routes())
}

/// Anonymous browsing
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/home", get(directory::home))
        .route("/categories", get(directory::categories))
        .route("/categories/:id", get(directory::category))
        .route("/news", get(news::list_news))
        .route("/news/:id", get(news::get_news))
        .route("/map/config", get(directory::map_config))
        .route("/contact", post(contact::send_message))
}

fn business_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/businesses",
            get(directory::search).post(businesses::submit_business),
        )
        .route("/businesses/locations", get(directory::locations))
        .route("/businesses/:id", get(directory::business_details))
        .route("/businesses/:id/favorite", post(businesses::toggle_favorite))
        .route("/businesses/:id/reviews", post(businesses::add_review))
        .route("/reviews/:id", delete(reviews::delete_review))
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/register-business", post(auth::register_business))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/password/forgot", post(auth::forgot_password))
        .route("/auth/password/reset", post(auth::reset_password))
        .route("/auth/password/forgot-sms", post(auth::forgot_password_sms))
        .route("/auth/password/reset-sms", post(auth::reset_password_sms))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/@me",
            get(users::get_current_user).patch(users::update_current_user),
        )
        .route("/users/@me/password", post(users::change_password))
        .route("/users/@me/reviews", get(users::my_reviews))
        .route("/users/@me/favorites", get(users::my_favorites))
        .route(
            "/users/@me/photos",
            get(users::my_photos).post(users::add_photo),
        )
        .route("/users/@me/photos/:id", delete(users::delete_photo))
}

fn owner_routes() -> Router<AppState> {
    Router::new()
        .route("/owner/dashboard", get(owner::dashboard))
        .route(
            "/owner/businesses",
            get(owner::my_businesses).post(owner::create_business),
        )
        .route("/owner/businesses/:id", patch(owner::update_business))
        .route(
            "/owner/businesses/:id/favorites",
            get(owner::business_favorites),
        )
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/stats", get(admin::stats))
        .route("/admin/logs", get(admin::logs))
        // Businesses
        .route(
            "/admin/businesses",
            get(admin::list_businesses).post(admin::create_business),
        )
        .route(
            "/admin/businesses/:id",
            patch(admin::update_business).delete(admin::delete_business),
        )
        .route("/admin/businesses/:id/approve", post(admin::approve_business))
        .route("/admin/businesses/:id/reject", post(admin::reject_business))
        .route(
            "/admin/businesses/:id/owner",
            put(admin::assign_owner).delete(admin::unassign_owner),
        )
        // Reviews
        .route("/admin/reviews", get(admin::list_reviews))
        .route("/admin/reviews/:id", delete(admin::delete_review))
        .route("/admin/reviews/:id/approve", post(admin::approve_review))
        .route("/admin/reviews/:id/reject", post(admin::reject_review))
        // Users
        .route("/admin/users", get(admin::list_users))
        .route("/admin/users/:id/ban", post(admin::ban_user))
        .route("/admin/users/:id/unban", post(admin::unban_user))
        .route(
            "/admin/users/:id/roles/:role",
            put(admin::add_role).delete(admin::remove_role),
        )
        // Categories
        .route("/admin/categories", post(admin::create_category))
        .route(
            "/admin/categories/:id",
            patch(admin::update_category).delete(admin::delete_category),
        )
        // News
        .route("/admin/news", post(admin::create_news))
        .route(
            "/admin/news/:id",
            patch(admin::update_news).delete(admin::delete_news),
        )
}
