//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance (migrations are applied on startup)
//! - Environment variables: DATABASE_URL, JWT_SECRET
//!
//! Redis is optional; without REDIS_URL the in-process token store is used.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use guide_core::value_objects::Roles;
use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, grant_roles, TestServer,
};
use reqwest::StatusCode;
use serde_json::json;

/// Register a fresh user and return the registration with its tokens
async fn register(server: &TestServer) -> (RegisterRequest, AuthResponse) {
    let request = RegisterRequest::unique();
    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    (request, auth)
}

/// Register, grant roles in the database and log in again for a fresh token
async fn register_with_roles(server: &TestServer, roles: Roles) -> AuthResponse {
    let (request, auth) = register(server).await;
    grant_roles(auth.user.id, roles).await.unwrap();

    let response = server
        .post("/api/v1/auth/login", &LoginRequest::from_register(&request))
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

/// Business created from the admin panel, public immediately
async fn admin_business(server: &TestServer, admin_token: &str) -> BusinessResponse {
    let response = server
        .post_auth(
            "/api/v1/admin/businesses",
            admin_token,
            &CreateBusinessRequest::unique(),
        )
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn search_by_name(server: &TestServer, name: &str) -> SearchResponse {
    let path = format!("/api/v1/businesses?query={}", name.replace(' ', "%20"));
    let response = server.get(&path).await.unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (request, auth) = register(&server).await;

    assert_eq!(auth.user.email, request.email);
    assert_eq!(auth.user.roles, vec!["User".to_string()]);
    assert_eq!(auth.token_type, "Bearer");
    assert!(!auth.access_token.is_empty());
    assert!(!auth.refresh_token.is_empty());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (request, _) = register(&server).await;

    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert!(!error.error.code.is_empty());
}

#[tokio::test]
async fn test_register_requires_consent() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mut request = RegisterRequest::unique();
    request.consent_accepted = false;

    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_login_wrong_password() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (request, _) = register(&server).await;

    let login = LoginRequest {
        email: request.email,
        password: "WrongPassword1".to_string(),
    };
    let response = server.post("/api/v1/auth/login", &login).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_refresh_token_rotates() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register(&server).await;
    let body = json!({ "refresh_token": auth.refresh_token });

    let response = server.post("/api/v1/auth/refresh", &body).await.unwrap();
    let refreshed: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_ne!(refreshed.refresh_token, auth.refresh_token);

    // The old refresh token was consumed by the rotation
    let response = server.post("/api/v1/auth/refresh", &body).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_me_requires_auth() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/users/@me").await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(error.error.code, "MISSING_AUTHORIZATION");
}

// ============================================================================
// Directory Tests
// ============================================================================

#[tokio::test]
async fn test_submitted_business_hidden_until_approved() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, user) = register(&server).await;
    let admin = register_with_roles(&server, Roles::ADMIN | Roles::USER).await;

    let request = CreateBusinessRequest::unique();
    let response = server
        .post_auth("/api/v1/businesses", &user.access_token, &request)
        .await
        .unwrap();
    let pending: BusinessResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert!(!pending.is_approved);

    assert_eq!(search_by_name(&server, &request.name).await.pagination.total, 0);
    let response = server
        .get(&format!("/api/v1/businesses/{}", pending.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/admin/businesses/{}/approve", pending.id),
            &admin.access_token,
            &json!({}),
        )
        .await
        .unwrap();
    let approved: BusinessResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(approved.is_approved && approved.is_active);

    let found = search_by_name(&server, &request.name).await;
    assert_eq!(found.pagination.total, 1);
    assert_eq!(found.data[0].id, pending.id);
}

#[tokio::test]
async fn test_business_id_must_be_positive() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/businesses/abc").await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "INVALID_PATH_PARAMETER");
}

#[tokio::test]
async fn test_map_config_is_public() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/map/config").await.unwrap();
    let config: MapConfigResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(config.provider == "google" || config.provider == "osm");
    assert_eq!(config.provider == "google", config.google_api_key.is_some());
}

// ============================================================================
// Review and Favorite Tests
// ============================================================================

#[tokio::test]
async fn test_review_updates_rating_and_rejects_duplicate() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = register_with_roles(&server, Roles::ADMIN | Roles::USER).await;
    let business = admin_business(&server, &admin.access_token).await;
    let (_, first) = register(&server).await;
    let (_, second) = register(&server).await;
    let path = format!("/api/v1/businesses/{}/reviews", business.id);

    for (token, rating) in [(&first.access_token, 5), (&second.access_token, 2)] {
        let response = server
            .post_auth(&path, token, &CreateReviewRequest::with_rating(rating))
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let response = server
        .post_auth(&path, &first.access_token, &CreateReviewRequest::with_rating(1))
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(error.error.code, "DUPLICATE_REVIEW");

    let response = server
        .get(&format!("/api/v1/businesses/{}", business.id))
        .await
        .unwrap();
    let details: BusinessDetailsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(details.business.total_reviews, 2);
    assert!((details.business.average_rating - 3.5).abs() < 1e-9);
    assert_eq!(details.reviews.len(), 2);
}

#[tokio::test]
async fn test_favorite_toggle_round_trip() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = register_with_roles(&server, Roles::ADMIN | Roles::USER).await;
    let business = admin_business(&server, &admin.access_token).await;
    let (_, user) = register(&server).await;
    let path = format!("/api/v1/businesses/{}/favorite", business.id);

    let response = server
        .post_auth(&path, &user.access_token, &json!({}))
        .await
        .unwrap();
    let added: FavoriteToggleResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(added.success && added.is_favorite);

    let response = server
        .post_auth(&path, &user.access_token, &json!({}))
        .await
        .unwrap();
    let removed: FavoriteToggleResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!removed.is_favorite);

    let response = server
        .get_auth("/api/v1/users/@me/favorites", &user.access_token)
        .await
        .unwrap();
    let favorites: Vec<BusinessResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(favorites.iter().all(|b| b.id != business.id));
}

// ============================================================================
// Admin Tests
// ============================================================================

#[tokio::test]
async fn test_admin_routes_require_admin_role() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, user) = register(&server).await;

    let response = server
        .get_auth("/api/v1/admin/stats", &user.access_token)
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error.error.code, "MISSING_PERMISSIONS");
}

#[tokio::test]
async fn test_reject_writes_audit_entry() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = register_with_roles(&server, Roles::ADMIN | Roles::USER).await;
    let business = admin_business(&server, &admin.access_token).await;

    let response = server
        .post_auth(
            &format!("/api/v1/admin/businesses/{}/reject", business.id),
            &admin.access_token,
            &json!({}),
        )
        .await
        .unwrap();
    let rejected: BusinessResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!rejected.is_approved && !rejected.is_active);

    let response = server
        .get_auth("/api/v1/admin/logs?limit=100", &admin.access_token)
        .await
        .unwrap();
    let logs: Vec<AdminLogResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let entries: Vec<&AdminLogResponse> = logs
        .iter()
        .filter(|l| l.entity_type == "Business" && l.entity_id == business.id.to_string())
        .filter(|l| l.action == "Reject")
        .collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].admin_user_id, admin.user.id);
}

// ============================================================================
// Password Reset and Assistant Tests
// ============================================================================

#[tokio::test]
async fn test_reset_with_unknown_code_is_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let body = json!({
        "phone_number": "0532 000 00 00",
        "code": "123456",
        "new_password": "NewSecret1",
    });

    let response = server
        .post("/api/v1/auth/password/reset-sms", &body)
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "INVALID_RESET_CODE");
}

#[tokio::test]
async fn test_assistant_rejects_empty_prompt() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .post("/api/ai/chat", &json!({ "prompt": "   " }))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_assistant_rejects_out_of_range_location() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let body = json!({ "prompt": "Sunset spots", "latitude": 200.0, "longitude": 31.99 });
    let response = server.post("/api/ai/chat", &body).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "VALIDATION_ERROR");
}
