//! Service-level tests over in-memory repositories
//!
//! These run without PostgreSQL or Redis:
//! ```bash
//! cargo test -p integration-tests --test service_tests
//! ```

use std::sync::Arc;
use std::time::Duration;

use guide_core::entities::AdminAction;
use guide_core::value_objects::Roles;
use guide_core::DomainError;
use guide_service::dto::{
    BusinessSearchParams, ChatRequest, CreateBusinessRequest, CreateReviewRequest,
    ForgotPasswordRequest, ForgotPasswordSmsRequest, LoginRequest, RegisterRequest,
    ResetPasswordRequest, ResetPasswordSmsRequest,
};
use guide_service::{
    AdminService, AssistantService, AuthService, BusinessSubmissionService, DirectoryService,
    FavoriteService, PasswordResetService, ReviewService, ServiceContext, ServiceError,
};
use integration_tests::memory::{
    memory_context, memory_context_builder, settings_with_code_ttl, CannedChatModel, MemoryDb,
    RecordingMailer, RecordingSms, TtlRecordingStore,
};

/// Ten digits without the country prefix; stored as 905321234567
const PHONE: &str = "532 123 45 67";
const PASSWORD: &str = "Secret123";

struct World {
    db: Arc<MemoryDb>,
    ctx: ServiceContext,
    admin_id: i64,
}

fn world() -> World {
    let db = MemoryDb::new();
    let ctx = memory_context(&db).expect("context");
    let admin = db.insert_user("admin@alanya.test", Roles::ADMIN | Roles::USER, None);
    World {
        db,
        ctx,
        admin_id: admin.id,
    }
}

fn business_request(name: &str) -> CreateBusinessRequest {
    CreateBusinessRequest {
        name: name.to_string(),
        description: Some("Seafood by the harbour".to_string()),
        address: "Iskele Cd. 12, Alanya".to_string(),
        phone: "0242 513 00 00".to_string(),
        email: None,
        website: None,
        image_url: None,
        working_hours: None,
        price_range: Some("$$".to_string()),
        category_id: None,
        latitude: Some(36.54),
        longitude: Some(31.99),
        is_featured: false,
    }
}

fn review(rating: i32) -> CreateReviewRequest {
    CreateReviewRequest {
        rating,
        comment: "Lovely place".to_string(),
    }
}

async fn approved_business(w: &World, name: &str) -> i64 {
    AdminService::new(&w.ctx)
        .create_business(w.admin_id, business_request(name))
        .await
        .expect("create business")
        .id
}

fn user(w: &World, email: &str) -> i64 {
    w.db.insert_user(email, Roles::USER, None).id
}

async fn search_ids(ctx: &ServiceContext) -> Vec<i64> {
    DirectoryService::new(ctx)
        .search(BusinessSearchParams::default(), 1, 100)
        .await
        .expect("search")
        .data
        .into_iter()
        .map(|b| b.id)
        .collect()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

// ============================================================================
// Reviews
// ============================================================================

#[tokio::test]
async fn test_second_review_by_same_user_is_rejected() {
    let w = world();
    let business_id = approved_business(&w, "Harbour Grill").await;
    let user_id = user(&w, "guest@alanya.test");
    let reviews = ReviewService::new(&w.ctx);

    reviews
        .add_review(user_id, business_id, review(5))
        .await
        .expect("first review");

    let err = reviews
        .add_review(user_id, business_id, review(1))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::DuplicateReview)));
    assert_eq!(err.status_code(), 409);

    let business = w.db.business(business_id).expect("business");
    assert_eq!(business.total_reviews, 1);
    assert_close(business.average_rating, 5.0);
}

#[tokio::test]
async fn test_average_tracks_approved_active_reviews() {
    let w = world();
    let business_id = approved_business(&w, "Castle View Cafe").await;
    let reviews = ReviewService::new(&w.ctx);
    let admin = AdminService::new(&w.ctx);

    let mut ids = Vec::new();
    for (i, rating) in [5, 4, 2].into_iter().enumerate() {
        let user_id = user(&w, &format!("visitor{i}@alanya.test"));
        let created = reviews
            .add_review(user_id, business_id, review(rating))
            .await
            .expect("review");
        ids.push(created.id);
    }

    let business = w.db.business(business_id).expect("business");
    assert_eq!(business.total_reviews, 3);
    assert_close(business.average_rating, 11.0 / 3.0);

    admin
        .reject_review(w.admin_id, ids[2])
        .await
        .expect("reject review");
    let business = w.db.business(business_id).expect("business");
    assert_eq!(business.total_reviews, 2);
    assert_close(business.average_rating, 4.5);

    let details = DirectoryService::new(&w.ctx)
        .business_details(business_id, None)
        .await
        .expect("details");
    let visible: Vec<f64> = details.reviews.iter().map(|r| f64::from(r.rating)).collect();
    assert_close(
        business.average_rating,
        visible.iter().sum::<f64>() / visible.len() as f64,
    );

    admin
        .approve_review(w.admin_id, ids[2])
        .await
        .expect("approve review");
    let business = w.db.business(business_id).expect("business");
    assert_eq!(business.total_reviews, 3);

    for id in ids {
        admin.delete_review(w.admin_id, id).await.expect("delete");
    }
    let business = w.db.business(business_id).expect("business");
    assert_eq!(business.total_reviews, 0);
    assert_close(business.average_rating, 0.0);
}

#[tokio::test]
async fn test_review_rating_out_of_range() {
    let w = world();
    let business_id = approved_business(&w, "Cleopatra Beach Bar").await;
    let user_id = user(&w, "guest@alanya.test");

    let err = ReviewService::new(&w.ctx)
        .add_review(user_id, business_id, review(6))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::InvalidRating(6))));
    assert_eq!(w.db.business(business_id).expect("business").total_reviews, 0);
}

#[tokio::test]
async fn test_author_can_delete_own_review_but_not_others() {
    let w = world();
    let business_id = approved_business(&w, "Damlatas Kebab").await;
    let author = user(&w, "author@alanya.test");
    let stranger = user(&w, "stranger@alanya.test");
    let reviews = ReviewService::new(&w.ctx);

    let created = reviews
        .add_review(author, business_id, review(3))
        .await
        .expect("review");

    let err = reviews.delete_review(stranger, created.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::NotReviewAuthor)));

    reviews
        .delete_review(author, created.id)
        .await
        .expect("author delete");
    assert_eq!(w.db.business(business_id).expect("business").total_reviews, 0);
    // Self-deletion is not an admin action
    assert_eq!(w.db.log_count(), 1);
}

// ============================================================================
// Favorites
// ============================================================================

#[tokio::test]
async fn test_toggling_favorite_twice_restores_state() {
    let w = world();
    let business_id = approved_business(&w, "Red Tower Bistro").await;
    let user_id = user(&w, "fan@alanya.test");
    let favorites = FavoriteService::new(&w.ctx);

    let first = favorites.toggle(user_id, business_id).await.expect("add");
    assert!(first.is_favorite);
    assert_eq!(favorites.my_favorites(user_id).await.expect("list").len(), 1);

    let details = DirectoryService::new(&w.ctx)
        .business_details(business_id, Some(user_id))
        .await
        .expect("details");
    assert!(details.is_favorite);

    let second = favorites.toggle(user_id, business_id).await.expect("remove");
    assert!(!second.is_favorite);
    assert!(favorites.my_favorites(user_id).await.expect("list").is_empty());
}

#[tokio::test]
async fn test_favorite_unknown_business_is_not_found() {
    let w = world();
    let user_id = user(&w, "fan@alanya.test");

    let err = FavoriteService::new(&w.ctx)
        .toggle(user_id, 9_999)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 404);
}

// ============================================================================
// Approval workflow
// ============================================================================

#[tokio::test]
async fn test_unapproved_business_is_hidden_from_public() {
    let w = world();
    let submitter = user(&w, "local@alanya.test");
    let visitor = user(&w, "visitor@alanya.test");

    let pending = BusinessSubmissionService::new(&w.ctx)
        .submit(submitter, business_request("Sunset Hammam"))
        .await
        .expect("submit");
    assert!(!pending.is_approved);

    let directory = DirectoryService::new(&w.ctx);
    assert!(search_ids(&w.ctx).await.is_empty());
    assert!(directory.locations().await.expect("locations").is_empty());

    let err = directory
        .business_details(pending.id, None)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 404);

    let err = ReviewService::new(&w.ctx)
        .add_review(visitor, pending.id, review(4))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::BusinessNotVisible)));

    // Admins still see it
    directory
        .business_details(pending.id, Some(w.admin_id))
        .await
        .expect("admin view");

    let admin = AdminService::new(&w.ctx);
    admin
        .approve_business(w.admin_id, pending.id)
        .await
        .expect("approve");
    assert_eq!(search_ids(&w.ctx).await, vec![pending.id]);
    assert_eq!(directory.locations().await.expect("locations").len(), 1);

    admin
        .reject_business(w.admin_id, pending.id)
        .await
        .expect("reject");
    assert!(search_ids(&w.ctx).await.is_empty());
}

#[tokio::test]
async fn test_approve_and_reject_write_one_log_entry_each() {
    let w = world();
    let submitter = user(&w, "local@alanya.test");
    let business = BusinessSubmissionService::new(&w.ctx)
        .submit(submitter, business_request("Dim Cay Garden"))
        .await
        .expect("submit");
    let admin = AdminService::new(&w.ctx);

    let before = w.db.log_count();
    admin
        .approve_business(w.admin_id, business.id)
        .await
        .expect("approve");
    assert_eq!(w.db.log_count(), before + 1);

    let entry = w.db.logs().pop().expect("log entry");
    assert_eq!(entry.action, AdminAction::Approve);
    assert_eq!(entry.entity_type, "Business");
    assert_eq!(entry.entity_id, business.id.to_string());
    assert_eq!(entry.admin_user_id, w.admin_id);

    admin
        .reject_business(w.admin_id, business.id)
        .await
        .expect("reject");
    assert_eq!(w.db.log_count(), before + 2);
    assert_eq!(w.db.logs().pop().expect("log entry").action, AdminAction::Reject);
}

#[tokio::test]
async fn test_non_admin_cannot_approve_and_nothing_is_logged() {
    let w = world();
    let submitter = user(&w, "local@alanya.test");
    let business = BusinessSubmissionService::new(&w.ctx)
        .submit(submitter, business_request("Alanya Ice Cream"))
        .await
        .expect("submit");

    let before = w.db.log_count();
    let err = AdminService::new(&w.ctx)
        .approve_business(submitter, business.id)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 403);
    assert_eq!(w.db.log_count(), before);
    assert!(!w.db.business(business.id).expect("business").is_approved);
}

#[tokio::test]
async fn test_review_moderation_is_logged() {
    let w = world();
    let business_id = approved_business(&w, "Kleopatra Pide").await;
    let user_id = user(&w, "guest@alanya.test");
    let created = ReviewService::new(&w.ctx)
        .add_review(user_id, business_id, review(2))
        .await
        .expect("review");

    let before = w.db.log_count();
    AdminService::new(&w.ctx)
        .reject_review(w.admin_id, created.id)
        .await
        .expect("reject");
    assert_eq!(w.db.log_count(), before + 1);

    let entry = w.db.logs().pop().expect("log entry");
    assert_eq!(entry.entity_type, "Review");
    assert_eq!(entry.action, AdminAction::Reject);
}

// ============================================================================
// Password reset
// ============================================================================

async fn register(ctx: &ServiceContext, email: &str) {
    AuthService::new(ctx)
        .register(RegisterRequest {
            full_name: "Deniz Yilmaz".to_string(),
            email: email.to_string(),
            password: PASSWORD.to_string(),
            phone_number: Some(PHONE.to_string()),
            consent_accepted: true,
        })
        .await
        .expect("register");
}

async fn login(ctx: &ServiceContext, email: &str, password: &str) -> bool {
    AuthService::new(ctx)
        .login(LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })
        .await
        .is_ok()
}

fn sms_reset(code: &str, new_password: &str) -> ResetPasswordSmsRequest {
    ResetPasswordSmsRequest {
        phone_number: PHONE.to_string(),
        code: code.to_string(),
        new_password: new_password.to_string(),
    }
}

fn forgot_sms() -> ForgotPasswordSmsRequest {
    ForgotPasswordSmsRequest {
        phone_number: PHONE.to_string(),
    }
}

#[tokio::test]
async fn test_sms_code_resets_password_once() {
    let db = MemoryDb::new();
    let sms = RecordingSms::new();
    let ctx = memory_context_builder(&db)
        .sms(sms.clone())
        .build()
        .expect("context");
    register(&ctx, "deniz@alanya.test").await;
    let resets = PasswordResetService::new(&ctx);

    resets.request_sms_reset(forgot_sms()).await.expect("request");
    let sent = sms.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "905321234567");
    let code = sms.last_code().expect("code in message");
    assert_eq!(code.len(), 6);

    resets
        .reset_with_sms_code(sms_reset(&code, "NewSecret1"))
        .await
        .expect("reset");
    assert!(login(&ctx, "deniz@alanya.test", "NewSecret1").await);
    assert!(!login(&ctx, "deniz@alanya.test", PASSWORD).await);

    let err = resets
        .reset_with_sms_code(sms_reset(&code, "Another1"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::InvalidResetCode)));
    assert!(login(&ctx, "deniz@alanya.test", "NewSecret1").await);
}

#[tokio::test]
async fn test_sms_code_lives_ten_minutes() {
    let db = MemoryDb::new();
    let store = TtlRecordingStore::new();
    let ctx = memory_context_builder(&db)
        .sms(RecordingSms::new())
        .token_store(store.clone())
        .build()
        .expect("context");
    register(&ctx, "deniz@alanya.test").await;

    PasswordResetService::new(&ctx)
        .request_sms_reset(forgot_sms())
        .await
        .expect("request");

    let ttls = store.ttls();
    let (_, ttl) = ttls
        .iter()
        .find(|(key, _)| key.starts_with("pwreset:sms:"))
        .expect("code stored");
    assert_eq!(*ttl, Duration::from_secs(600));
}

#[tokio::test]
async fn test_expired_sms_code_is_rejected() {
    let db = MemoryDb::new();
    let sms = RecordingSms::new();
    let ctx = memory_context_builder(&db)
        .sms(sms.clone())
        .settings(settings_with_code_ttl(Duration::ZERO))
        .build()
        .expect("context");
    register(&ctx, "deniz@alanya.test").await;
    let resets = PasswordResetService::new(&ctx);

    resets.request_sms_reset(forgot_sms()).await.expect("request");
    let code = sms.last_code().expect("code in message");

    let err = resets
        .reset_with_sms_code(sms_reset(&code, "NewSecret1"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::InvalidResetCode)));
    assert!(login(&ctx, "deniz@alanya.test", PASSWORD).await);
}

#[tokio::test]
async fn test_wrong_sms_code_leaves_real_code_usable() {
    let db = MemoryDb::new();
    let sms = RecordingSms::new();
    let ctx = memory_context_builder(&db)
        .sms(sms.clone())
        .build()
        .expect("context");
    register(&ctx, "deniz@alanya.test").await;
    let resets = PasswordResetService::new(&ctx);

    resets.request_sms_reset(forgot_sms()).await.expect("request");
    let code = sms.last_code().expect("code in message");
    let wrong = if code == "000000" { "111111" } else { "000000" };

    let err = resets
        .reset_with_sms_code(sms_reset(wrong, "NewSecret1"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::InvalidResetCode)));
    assert!(login(&ctx, "deniz@alanya.test", PASSWORD).await);

    resets
        .reset_with_sms_code(sms_reset(&code, "NewSecret1"))
        .await
        .expect("real code still valid after a wrong guess");
    assert!(login(&ctx, "deniz@alanya.test", "NewSecret1").await);
}

#[tokio::test]
async fn test_weak_new_password_keeps_sms_code() {
    let db = MemoryDb::new();
    let sms = RecordingSms::new();
    let ctx = memory_context_builder(&db)
        .sms(sms.clone())
        .build()
        .expect("context");
    register(&ctx, "deniz@alanya.test").await;
    let resets = PasswordResetService::new(&ctx);

    resets.request_sms_reset(forgot_sms()).await.expect("request");
    let code = sms.last_code().expect("code in message");

    let err = resets
        .reset_with_sms_code(sms_reset(&code, "short"))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 400);

    resets
        .reset_with_sms_code(sms_reset(&code, "NewSecret1"))
        .await
        .expect("code survives a rejected password");
    assert!(login(&ctx, "deniz@alanya.test", "NewSecret1").await);
}

#[tokio::test]
async fn test_sms_code_accepted_once_under_concurrent_attempts() {
    let db = MemoryDb::new();
    let sms = RecordingSms::new();
    let ctx = memory_context_builder(&db)
        .sms(sms.clone())
        .build()
        .expect("context");
    register(&ctx, "deniz@alanya.test").await;
    let resets = PasswordResetService::new(&ctx);

    resets.request_sms_reset(forgot_sms()).await.expect("request");
    let code = sms.last_code().expect("code in message");

    let (first, second) = tokio::join!(
        resets.reset_with_sms_code(sms_reset(&code, "FirstSecret1")),
        resets.reset_with_sms_code(sms_reset(&code, "SecondSecret2")),
    );
    assert_eq!(u8::from(first.is_ok()) + u8::from(second.is_ok()), 1);
}

#[tokio::test]
async fn test_unknown_number_gets_same_ack_and_no_sms() {
    let db = MemoryDb::new();
    let sms = RecordingSms::new();
    let ctx = memory_context_builder(&db)
        .sms(sms.clone())
        .build()
        .expect("context");

    let ack = PasswordResetService::new(&ctx)
        .request_sms_reset(forgot_sms())
        .await
        .expect("ack");
    assert!(ack.success);
    assert!(sms.sent().is_empty());
}

#[tokio::test]
async fn test_sms_reset_disabled_without_provider() {
    let db = MemoryDb::new();
    let ctx = memory_context(&db).expect("context");

    let err = PasswordResetService::new(&ctx)
        .request_sms_reset(forgot_sms())
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 503);
}

#[tokio::test]
async fn test_email_token_resets_password_once() {
    let db = MemoryDb::new();
    let mailer = RecordingMailer::new();
    let ctx = memory_context_builder(&db)
        .mailer(mailer.clone())
        .build()
        .expect("context");
    register(&ctx, "deniz@alanya.test").await;
    let resets = PasswordResetService::new(&ctx);

    resets
        .request_email_reset(ForgotPasswordRequest {
            email: "deniz@alanya.test".to_string(),
        })
        .await
        .expect("request");
    let mail = mailer.sent().pop().expect("mail sent");
    assert_eq!(mail.to, "deniz@alanya.test");
    let token = mailer.last_reset_token().expect("token in link");
    let user_id = AuthService::new(&ctx)
        .login(LoginRequest {
            email: "deniz@alanya.test".to_string(),
            password: PASSWORD.to_string(),
        })
        .await
        .expect("login")
        .user
        .id;

    let request = ResetPasswordRequest {
        user_id,
        token,
        new_password: "NewSecret1".to_string(),
    };
    resets
        .reset_with_email_token(request.clone())
        .await
        .expect("reset");
    assert!(login(&ctx, "deniz@alanya.test", "NewSecret1").await);

    let err = resets.reset_with_email_token(request).await.unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::InvalidResetCode)));
}

// ============================================================================
// Assistant
// ============================================================================

#[tokio::test]
async fn test_assistant_forwards_prompt_with_location() {
    let db = MemoryDb::new();
    let model = CannedChatModel::new("Try the fish market.");
    let ctx = memory_context_builder(&db)
        .chat_model(model.clone())
        .build()
        .expect("context");

    let reply = AssistantService::new(&ctx)
        .chat(ChatRequest {
            prompt: "Where can I eat fish?".to_string(),
            latitude: Some(36.54),
            longitude: Some(31.99),
        })
        .await
        .expect("reply");
    assert_eq!(reply.response, "Try the fish market.");

    let prompts = model.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("36.54, 31.99"));
    assert!(prompts[0].contains("Where can I eat fish?"));
}

#[tokio::test]
async fn test_assistant_disabled_without_key() {
    let db = MemoryDb::new();
    let ctx = memory_context(&db).expect("context");

    let err = AssistantService::new(&ctx)
        .chat(ChatRequest {
            prompt: "Hello".to_string(),
            ..ChatRequest::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Unavailable(_)));
}
