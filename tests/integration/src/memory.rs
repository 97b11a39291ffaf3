//! In-process repositories and gateways
//!
//! [`MemoryDb`] implements every repository trait over plain vectors behind
//! one lock, so the review aggregate and the business rows change together
//! the way the PostgreSQL transaction does. The recording gateways capture
//! what the services send.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use guide_cache::MemoryTokenStore;
use guide_common::JwtService;
use guide_core::entities::{
    AdminLog, Business, BusinessStatusFilter, Category, Favorite, FavoriteFan, NewAdminLog,
    NewBusiness, NewCategory, NewNews, NewReview, NewUser, NewUserPhoto, News, Review,
    ReviewStatusFilter, User, UserPhoto,
};
use guide_core::traits::{
    AdminLogRepository, BusinessFilter, BusinessRepository, BusinessSort, CategoryCount,
    CategoryRepository, ChatModel, FavoriteRepository, GatewayError, Mailer, NewsRepository,
    OutgoingMail, RepoResult, ReviewRepository, SmsSender, TokenStore, UserPhotoRepository,
    UserRepository,
};
use guide_core::value_objects::{PhoneNumber, RatingSummary, Roles};
use guide_core::DomainError;
use guide_service::{ServiceContext, ServiceContextBuilder, ServiceResult, ServiceSettings};

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

#[derive(Default)]
struct Tables {
    next_id: i64,
    users: Vec<(User, String)>,
    businesses: Vec<Business>,
    reviews: Vec<Review>,
    categories: Vec<Category>,
    favorites: Vec<Favorite>,
    news: Vec<News>,
    logs: Vec<AdminLog>,
    photos: Vec<UserPhoto>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn user(&self, id: i64) -> Option<&User> {
        self.users.iter().map(|(u, _)| u).find(|u| u.id == id)
    }

    fn business_mut(&mut self, id: i64) -> RepoResult<&mut Business> {
        self.businesses
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(DomainError::BusinessNotFound(id))
    }

    fn category_name(&self, id: Option<i64>) -> Option<&str> {
        let id = id?;
        self.categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
    }

    /// Same rule as the SQL recompute: mean and count of visible reviews
    fn refresh_rating(&mut self, business_id: i64) -> RepoResult<()> {
        let ratings: Vec<i16> = self
            .reviews
            .iter()
            .filter(|r| r.business_id == business_id && r.is_visible())
            .map(|r| r.rating.value())
            .collect();
        let summary = RatingSummary::from_ratings(&ratings);

        let business = self.business_mut(business_id)?;
        business.average_rating = summary.average;
        business.total_reviews = summary.count;
        Ok(())
    }

    fn matches(&self, business: &Business, filter: &BusinessFilter) -> bool {
        if !business.is_publicly_visible() {
            return false;
        }
        if let Some(query) = filter.query.as_deref().map(str::to_lowercase) {
            let hit = [
                Some(business.name.as_str()),
                business.description.as_deref(),
                Some(business.address.as_str()),
            ]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&query));
            if !hit {
                return false;
            }
        }
        if let Some(category) = filter.category.as_deref() {
            if self.category_name(business.category_id) != Some(category) {
                return false;
            }
        }
        if let Some(min) = filter.min_rating {
            if business.average_rating < min {
                return false;
            }
        }
        if let Some(price) = filter.price_range.as_deref() {
            if business.price_range.as_deref() != Some(price) {
                return false;
            }
        }
        true
    }
}

fn page<T: Clone>(rows: Vec<T>, limit: i64, offset: i64) -> Vec<T> {
    let offset = usize::try_from(offset).unwrap_or(0);
    let limit = usize::try_from(limit).unwrap_or(0);
    rows.into_iter().skip(offset).take(limit).collect()
}

fn newest_first<T>(rows: &mut [T], key: impl Fn(&T) -> (DateTime<Utc>, i64)) {
    rows.sort_by(|a, b| key(b).cmp(&key(a)));
}

/// Every repository over shared in-memory tables
#[derive(Default)]
pub struct MemoryDb {
    tables: Mutex<Tables>,
}

impl MemoryDb {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Insert a user directly, bypassing registration
    pub fn insert_user(&self, email: &str, roles: Roles, phone: Option<&str>) -> User {
        let mut t = self.tables.lock();
        let now = Utc::now();
        let user = User {
            id: t.next_id(),
            email: email.to_string(),
            full_name: email.split('@').next().unwrap_or(email).to_string(),
            display_name: None,
            phone_number: phone.map(str::to_string),
            avatar_url: None,
            bio: None,
            city: None,
            country: None,
            website: None,
            roles,
            is_active: true,
            consent_accepted: true,
            consent_at: Some(now),
            lockout_end: None,
            created_at: now,
            updated_at: now,
        };
        t.users.push((user.clone(), String::new()));
        user
    }

    /// Stored copy of a business, including its rating aggregate
    pub fn business(&self, id: i64) -> Option<Business> {
        self.tables
            .lock()
            .businesses
            .iter()
            .find(|b| b.id == id)
            .cloned()
    }

    pub fn password_hash(&self, user_id: i64) -> Option<String> {
        self.tables
            .lock()
            .users
            .iter()
            .find(|(u, _)| u.id == user_id)
            .map(|(_, hash)| hash.clone())
    }

    pub fn log_count(&self) -> usize {
        self.tables.lock().logs.len()
    }

    pub fn logs(&self) -> Vec<AdminLog> {
        self.tables.lock().logs.clone()
    }
}

#[async_trait]
impl UserRepository for MemoryDb {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        Ok(self.tables.lock().user(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self
            .tables
            .lock()
            .users
            .iter()
            .map(|(u, _)| u)
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_phone(&self, phone: &PhoneNumber) -> RepoResult<Option<User>> {
        Ok(self
            .tables
            .lock()
            .users
            .iter()
            .map(|(u, _)| u)
            .find(|u| u.phone_number.as_deref() == Some(phone.as_str()))
            .cloned())
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn create(&self, new: &NewUser) -> RepoResult<User> {
        if self.email_exists(&new.email).await? {
            return Err(DomainError::EmailAlreadyExists);
        }
        let mut t = self.tables.lock();
        let now = Utc::now();
        let user = User {
            id: t.next_id(),
            email: new.email.clone(),
            full_name: new.full_name.clone(),
            display_name: None,
            phone_number: new.phone_number.as_ref().map(|p| p.as_str().to_string()),
            avatar_url: None,
            bio: None,
            city: None,
            country: None,
            website: None,
            roles: new.roles,
            is_active: true,
            consent_accepted: new.consent_accepted,
            consent_at: new.consent_accepted.then_some(now),
            lockout_end: None,
            created_at: now,
            updated_at: now,
        };
        t.users.push((user.clone(), new.password_hash.clone()));
        Ok(user)
    }

    async fn update(&self, user: &User) -> RepoResult<()> {
        let mut t = self.tables.lock();
        let (stored, _) = t
            .users
            .iter_mut()
            .find(|(u, _)| u.id == user.id)
            .ok_or(DomainError::UserNotFound(user.id))?;
        *stored = user.clone();
        Ok(())
    }

    async fn get_password_hash(&self, id: i64) -> RepoResult<Option<String>> {
        Ok(self.password_hash(id))
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> RepoResult<()> {
        let mut t = self.tables.lock();
        let (_, hash) = t
            .users
            .iter_mut()
            .find(|(u, _)| u.id == id)
            .ok_or(DomainError::UserNotFound(id))?;
        *hash = password_hash.to_string();
        Ok(())
    }

    async fn set_lockout(&self, id: i64, until: Option<DateTime<Utc>>) -> RepoResult<()> {
        let mut t = self.tables.lock();
        let (user, _) = t
            .users
            .iter_mut()
            .find(|(u, _)| u.id == id)
            .ok_or(DomainError::UserNotFound(id))?;
        user.lockout_end = until;
        Ok(())
    }

    async fn set_roles(&self, id: i64, roles: Roles) -> RepoResult<()> {
        let mut t = self.tables.lock();
        let (user, _) = t
            .users
            .iter_mut()
            .find(|(u, _)| u.id == id)
            .ok_or(DomainError::UserNotFound(id))?;
        user.roles = roles;
        Ok(())
    }

    async fn list(&self, limit: i64, offset: i64) -> RepoResult<Vec<User>> {
        let mut users: Vec<User> = self
            .tables
            .lock()
            .users
            .iter()
            .map(|(u, _)| u.clone())
            .collect();
        newest_first(&mut users, |u| (u.created_at, u.id));
        Ok(page(users, limit, offset))
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.tables.lock().users.len() as i64)
    }

    async fn count_with_role(&self, role: Roles) -> RepoResult<i64> {
        let t = self.tables.lock();
        Ok(t.users.iter().filter(|(u, _)| u.roles.intersects(role)).count() as i64)
    }

    async fn count_created_since(&self, since: DateTime<Utc>) -> RepoResult<i64> {
        let t = self.tables.lock();
        Ok(t.users.iter().filter(|(u, _)| u.created_at >= since).count() as i64)
    }
}

#[async_trait]
impl BusinessRepository for MemoryDb {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Business>> {
        Ok(self.business(id))
    }

    async fn create(&self, new: &NewBusiness) -> RepoResult<Business> {
        let mut t = self.tables.lock();
        let now = Utc::now();
        let business = Business {
            id: t.next_id(),
            name: new.name.clone(),
            description: new.description.clone(),
            address: new.address.clone(),
            phone: new.phone.clone(),
            email: new.email.clone(),
            website: new.website.clone(),
            image_url: new.image_url.clone(),
            working_hours: new.working_hours.clone(),
            price_range: new.price_range.clone(),
            category_id: new.category_id,
            owner_id: new.owner_id,
            created_by: new.created_by,
            is_active: true,
            is_approved: new.is_approved(),
            is_featured: new.is_featured,
            average_rating: 0.0,
            total_reviews: 0,
            location: new.location,
            created_at: now,
            updated_at: now,
        };
        t.businesses.push(business.clone());
        Ok(business)
    }

    async fn update(&self, business: &Business) -> RepoResult<()> {
        let mut t = self.tables.lock();
        let stored = t.business_mut(business.id)?;
        let (average, total) = (stored.average_rating, stored.total_reviews);
        *stored = business.clone();
        stored.average_rating = average;
        stored.total_reviews = total;
        Ok(())
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        let mut t = self.tables.lock();
        t.businesses.retain(|b| b.id != id);
        t.reviews.retain(|r| r.business_id != id);
        t.favorites.retain(|f| f.business_id != id);
        Ok(())
    }

    async fn search(&self, filter: &BusinessFilter) -> RepoResult<Vec<Business>> {
        let t = self.tables.lock();
        let mut rows: Vec<Business> = t
            .businesses
            .iter()
            .filter(|b| t.matches(b, filter))
            .cloned()
            .collect();
        match filter.sort {
            BusinessSort::Featured => rows.sort_by(|a, b| {
                b.is_featured
                    .cmp(&a.is_featured)
                    .then(b.average_rating.total_cmp(&a.average_rating))
                    .then(b.id.cmp(&a.id))
            }),
            BusinessSort::Rating => rows.sort_by(|a, b| {
                b.average_rating
                    .total_cmp(&a.average_rating)
                    .then(b.total_reviews.cmp(&a.total_reviews))
                    .then(b.id.cmp(&a.id))
            }),
            BusinessSort::Reviews => rows.sort_by(|a, b| {
                b.total_reviews
                    .cmp(&a.total_reviews)
                    .then(b.average_rating.total_cmp(&a.average_rating))
                    .then(b.id.cmp(&a.id))
            }),
            BusinessSort::Name | BusinessSort::Distance => {
                rows.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
            }
        }
        Ok(page(rows, filter.limit, filter.offset))
    }

    async fn count_search(&self, filter: &BusinessFilter) -> RepoResult<i64> {
        let t = self.tables.lock();
        Ok(t.businesses.iter().filter(|b| t.matches(b, filter)).count() as i64)
    }

    async fn featured(&self, limit: i64) -> RepoResult<Vec<Business>> {
        let mut rows: Vec<Business> = self
            .tables
            .lock()
            .businesses
            .iter()
            .filter(|b| b.is_publicly_visible() && b.is_featured)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.average_rating.total_cmp(&a.average_rating));
        Ok(page(rows, limit, 0))
    }

    async fn top_rated(&self, limit: i64) -> RepoResult<Vec<Business>> {
        let mut rows: Vec<Business> = self
            .tables
            .lock()
            .businesses
            .iter()
            .filter(|b| b.is_publicly_visible() && b.total_reviews > 0)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.average_rating.total_cmp(&a.average_rating));
        Ok(page(rows, limit, 0))
    }

    async fn similar(&self, business: &Business, limit: i64) -> RepoResult<Vec<Business>> {
        let Some(category_id) = business.category_id else {
            return Ok(Vec::new());
        };
        let rows: Vec<Business> = self
            .tables
            .lock()
            .businesses
            .iter()
            .filter(|b| {
                b.is_publicly_visible() && b.category_id == Some(category_id) && b.id != business.id
            })
            .cloned()
            .collect();
        Ok(page(rows, limit, 0))
    }

    async fn with_locations(&self) -> RepoResult<Vec<Business>> {
        Ok(self
            .tables
            .lock()
            .businesses
            .iter()
            .filter(|b| b.is_publicly_visible() && b.location.is_some())
            .cloned()
            .collect())
    }

    async fn list_by_status(
        &self,
        status: BusinessStatusFilter,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Business>> {
        let mut rows: Vec<Business> = self
            .tables
            .lock()
            .businesses
            .iter()
            .filter(|b| match status {
                BusinessStatusFilter::Pending => !b.is_approved,
                BusinessStatusFilter::Approved => b.is_approved,
                BusinessStatusFilter::All => true,
            })
            .cloned()
            .collect();
        newest_first(&mut rows, |b| (b.created_at, b.id));
        Ok(page(rows, limit, offset))
    }

    async fn find_by_owner(&self, owner_id: i64) -> RepoResult<Vec<Business>> {
        let mut rows: Vec<Business> = self
            .tables
            .lock()
            .businesses
            .iter()
            .filter(|b| b.is_owned_by(owner_id))
            .cloned()
            .collect();
        newest_first(&mut rows, |b| (b.created_at, b.id));
        Ok(rows)
    }

    async fn set_owner(&self, id: i64, owner_id: Option<i64>) -> RepoResult<()> {
        let mut t = self.tables.lock();
        t.business_mut(id)?.owner_id = owner_id;
        Ok(())
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.tables.lock().businesses.len() as i64)
    }

    async fn count_pending(&self) -> RepoResult<i64> {
        let t = self.tables.lock();
        Ok(t.businesses.iter().filter(|b| !b.is_approved).count() as i64)
    }

    async fn count_created_since(&self, since: DateTime<Utc>) -> RepoResult<i64> {
        let t = self.tables.lock();
        Ok(t.businesses.iter().filter(|b| b.created_at >= since).count() as i64)
    }

    async fn top_categories(&self, limit: i64) -> RepoResult<Vec<CategoryCount>> {
        let t = self.tables.lock();
        let mut counts: Vec<CategoryCount> = t
            .categories
            .iter()
            .map(|c| CategoryCount {
                category_id: c.id,
                name: c.name.clone(),
                business_count: t
                    .businesses
                    .iter()
                    .filter(|b| b.category_id == Some(c.id))
                    .count() as i64,
            })
            .collect();
        counts.sort_by(|a, b| {
            b.business_count
                .cmp(&a.business_count)
                .then(a.name.cmp(&b.name))
        });
        Ok(page(counts, limit, 0))
    }
}

#[async_trait]
impl ReviewRepository for MemoryDb {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Review>> {
        Ok(self.tables.lock().reviews.iter().find(|r| r.id == id).cloned())
    }

    async fn exists_for(&self, business_id: i64, user_id: i64) -> RepoResult<bool> {
        let t = self.tables.lock();
        Ok(t
            .reviews
            .iter()
            .any(|r| r.business_id == business_id && r.user_id == user_id))
    }

    async fn visible_for_business(&self, business_id: i64) -> RepoResult<Vec<Review>> {
        let mut rows: Vec<Review> = self
            .tables
            .lock()
            .reviews
            .iter()
            .filter(|r| r.business_id == business_id && r.is_visible())
            .cloned()
            .collect();
        newest_first(&mut rows, |r| (r.created_at, r.id));
        Ok(rows)
    }

    async fn find_by_user(&self, user_id: i64) -> RepoResult<Vec<Review>> {
        let mut rows: Vec<Review> = self
            .tables
            .lock()
            .reviews
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        newest_first(&mut rows, |r| (r.created_at, r.id));
        Ok(rows)
    }

    async fn list_by_status(
        &self,
        status: ReviewStatusFilter,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Review>> {
        let mut rows: Vec<Review> = self
            .tables
            .lock()
            .reviews
            .iter()
            .filter(|r| status == ReviewStatusFilter::All || !r.is_approved)
            .cloned()
            .collect();
        newest_first(&mut rows, |r| (r.created_at, r.id));
        Ok(page(rows, limit, offset))
    }

    async fn create_and_refresh_rating(&self, new: &NewReview) -> RepoResult<Review> {
        let mut t = self.tables.lock();
        if t
            .reviews
            .iter()
            .any(|r| r.business_id == new.business_id && r.user_id == new.user_id)
        {
            return Err(DomainError::DuplicateReview);
        }
        let business_name = t.business_mut(new.business_id)?.name.clone();
        let author_name = t.user(new.user_id).map(User::display_label);

        let review = Review {
            id: t.next_id(),
            business_id: new.business_id,
            user_id: new.user_id,
            rating: new.rating,
            comment: new.comment.clone(),
            is_approved: true,
            is_active: true,
            created_at: Utc::now(),
            author_name,
            business_name: Some(business_name),
        };
        t.reviews.push(review.clone());
        t.refresh_rating(new.business_id)?;
        Ok(review)
    }

    async fn delete_and_refresh_rating(&self, id: i64) -> RepoResult<()> {
        let mut t = self.tables.lock();
        let business_id = t
            .reviews
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.business_id)
            .ok_or(DomainError::ReviewNotFound(id))?;
        t.reviews.retain(|r| r.id != id);
        t.refresh_rating(business_id)
    }

    async fn set_status_and_refresh_rating(
        &self,
        id: i64,
        is_approved: bool,
        is_active: bool,
    ) -> RepoResult<Review> {
        let mut t = self.tables.lock();
        let review = t
            .reviews
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(DomainError::ReviewNotFound(id))?;
        review.is_approved = is_approved;
        review.is_active = is_active;
        let review = review.clone();
        t.refresh_rating(review.business_id)?;
        Ok(review)
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.tables.lock().reviews.len() as i64)
    }

    async fn count_pending(&self) -> RepoResult<i64> {
        let t = self.tables.lock();
        Ok(t.reviews.iter().filter(|r| !r.is_approved).count() as i64)
    }

    async fn count_created_since(&self, since: DateTime<Utc>) -> RepoResult<i64> {
        let t = self.tables.lock();
        Ok(t.reviews.iter().filter(|r| r.created_at >= since).count() as i64)
    }
}

#[async_trait]
impl CategoryRepository for MemoryDb {
    async fn list(&self) -> RepoResult<Vec<Category>> {
        let mut rows = self.tables.lock().categories.clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn with_visible_businesses(&self) -> RepoResult<Vec<Category>> {
        let t = self.tables.lock();
        let mut rows: Vec<Category> = t
            .categories
            .iter()
            .filter(|c| {
                t.businesses
                    .iter()
                    .any(|b| b.is_publicly_visible() && b.category_id == Some(c.id))
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Category>> {
        Ok(self.tables.lock().categories.iter().find(|c| c.id == id).cloned())
    }

    async fn create(&self, new: &NewCategory) -> RepoResult<Category> {
        let mut t = self.tables.lock();
        if t.categories.iter().any(|c| c.name == new.name) {
            return Err(DomainError::CategoryNameExists);
        }
        let category = Category {
            id: t.next_id(),
            name: new.name.clone(),
            description: new.description.clone(),
            icon: new.icon.clone(),
            created_at: Utc::now(),
        };
        t.categories.push(category.clone());
        Ok(category)
    }

    async fn update(&self, category: &Category) -> RepoResult<()> {
        let mut t = self.tables.lock();
        let stored = t
            .categories
            .iter_mut()
            .find(|c| c.id == category.id)
            .ok_or(DomainError::CategoryNotFound(category.id))?;
        *stored = category.clone();
        Ok(())
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        let mut t = self.tables.lock();
        t.categories.retain(|c| c.id != id);
        for business in t.businesses.iter_mut().filter(|b| b.category_id == Some(id)) {
            business.category_id = None;
        }
        Ok(())
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.tables.lock().categories.len() as i64)
    }
}

#[async_trait]
impl FavoriteRepository for MemoryDb {
    async fn toggle(&self, user_id: i64, business_id: i64) -> RepoResult<bool> {
        let mut t = self.tables.lock();
        let before = t.favorites.len();
        t.favorites
            .retain(|f| !(f.user_id == user_id && f.business_id == business_id));
        if t.favorites.len() < before {
            return Ok(false);
        }
        t.business_mut(business_id)?;
        t.favorites.push(Favorite {
            user_id,
            business_id,
            created_at: Utc::now(),
        });
        Ok(true)
    }

    async fn exists(&self, user_id: i64, business_id: i64) -> RepoResult<bool> {
        let t = self.tables.lock();
        Ok(t
            .favorites
            .iter()
            .any(|f| f.user_id == user_id && f.business_id == business_id))
    }

    async fn businesses_for_user(&self, user_id: i64) -> RepoResult<Vec<Business>> {
        let t = self.tables.lock();
        Ok(t.favorites
            .iter()
            .rev()
            .filter(|f| f.user_id == user_id)
            .filter_map(|f| t.businesses.iter().find(|b| b.id == f.business_id))
            .filter(|b| b.is_publicly_visible())
            .cloned()
            .collect())
    }

    async fn fans_of(&self, business_id: i64) -> RepoResult<Vec<FavoriteFan>> {
        let t = self.tables.lock();
        Ok(t.favorites
            .iter()
            .rev()
            .filter(|f| f.business_id == business_id)
            .filter_map(|f| {
                t.user(f.user_id).map(|u| FavoriteFan {
                    user_id: u.id,
                    name: u.display_label(),
                    email: u.email.clone(),
                    created_at: f.created_at,
                })
            })
            .collect())
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.tables.lock().favorites.len() as i64)
    }

    async fn count_for_owner(&self, owner_id: i64) -> RepoResult<i64> {
        let t = self.tables.lock();
        Ok(t.favorites
            .iter()
            .filter(|f| {
                t.businesses
                    .iter()
                    .any(|b| b.id == f.business_id && b.is_owned_by(owner_id))
            })
            .count() as i64)
    }
}

#[async_trait]
impl NewsRepository for MemoryDb {
    async fn list(&self, limit: i64, offset: i64) -> RepoResult<Vec<News>> {
        let mut rows = self.tables.lock().news.clone();
        newest_first(&mut rows, |n| (n.published_at, n.id));
        Ok(page(rows, limit, offset))
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<News>> {
        Ok(self.tables.lock().news.iter().find(|n| n.id == id).cloned())
    }

    async fn find_and_increment_views(&self, id: i64) -> RepoResult<Option<News>> {
        let mut t = self.tables.lock();
        Ok(t.news.iter_mut().find(|n| n.id == id).map(|n| {
            n.view_count += 1;
            n.clone()
        }))
    }

    async fn create(&self, new: &NewNews) -> RepoResult<News> {
        let mut t = self.tables.lock();
        let now = Utc::now();
        let news = News {
            id: t.next_id(),
            title: new.title.clone(),
            content: new.content.clone(),
            image_url: new.image_url.clone(),
            author_id: new.author_id,
            view_count: 0,
            published_at: now,
            updated_at: now,
        };
        t.news.push(news.clone());
        Ok(news)
    }

    async fn update(&self, news: &News) -> RepoResult<()> {
        let mut t = self.tables.lock();
        let stored = t
            .news
            .iter_mut()
            .find(|n| n.id == news.id)
            .ok_or(DomainError::NewsNotFound(news.id))?;
        *stored = news.clone();
        Ok(())
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        self.tables.lock().news.retain(|n| n.id != id);
        Ok(())
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.tables.lock().news.len() as i64)
    }
}

#[async_trait]
impl AdminLogRepository for MemoryDb {
    async fn append(&self, entry: &NewAdminLog) -> RepoResult<AdminLog> {
        let mut t = self.tables.lock();
        let log = AdminLog {
            id: t.next_id(),
            admin_user_id: entry.admin_user_id,
            action: entry.action,
            entity_type: entry.entity_type.to_string(),
            entity_id: entry.entity_id.clone(),
            description: entry.description.clone(),
            created_at: Utc::now(),
        };
        t.logs.push(log.clone());
        Ok(log)
    }

    async fn latest(&self, limit: i64) -> RepoResult<Vec<AdminLog>> {
        let mut rows = self.tables.lock().logs.clone();
        newest_first(&mut rows, |l| (l.created_at, l.id));
        Ok(page(rows, limit, 0))
    }
}

#[async_trait]
impl UserPhotoRepository for MemoryDb {
    async fn find_by_user(&self, user_id: i64) -> RepoResult<Vec<UserPhoto>> {
        let mut rows: Vec<UserPhoto> = self
            .tables
            .lock()
            .photos
            .iter()
            .filter(|p| p.user_id == user_id && p.is_active)
            .cloned()
            .collect();
        newest_first(&mut rows, |p| (p.created_at, p.id));
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<UserPhoto>> {
        Ok(self.tables.lock().photos.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, new: &NewUserPhoto) -> RepoResult<UserPhoto> {
        let mut t = self.tables.lock();
        let photo = UserPhoto {
            id: t.next_id(),
            user_id: new.user_id,
            photo_url: new.photo_url.clone(),
            description: new.description.clone(),
            is_active: true,
            created_at: Utc::now(),
        };
        t.photos.push(photo.clone());
        Ok(photo)
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        self.tables.lock().photos.retain(|p| p.id != id);
        Ok(())
    }
}

// ============================================================================
// Gateways
// ============================================================================

/// SMS sender that keeps every message
#[derive(Default)]
pub struct RecordingSms {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingSms {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().clone()
    }

    /// Six-digit code from the most recent message
    pub fn last_code(&self) -> Option<String> {
        let sent = self.sent.lock();
        let (_, text) = sent.last()?;
        let code: String = text
            .split("code: ")
            .nth(1)?
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        (!code.is_empty()).then_some(code)
    }
}

#[async_trait]
impl SmsSender for RecordingSms {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn send(&self, to: &PhoneNumber, message: &str) -> bool {
        self.sent
            .lock()
            .push((to.as_str().to_string(), message.to_string()));
        true
    }
}

/// Mailer that keeps every mail
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutgoingMail>>,
}

impl RecordingMailer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().clone()
    }

    /// Reset token from the link in the most recent mail
    pub fn last_reset_token(&self) -> Option<String> {
        let sent = self.sent.lock();
        let body = &sent.last()?.html_body;
        let token: String = body
            .split("token=")
            .nth(1)?
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect();
        (!token.is_empty()).then_some(token)
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    fn is_enabled(&self) -> bool {
        true
    }

    fn admin_address(&self) -> Option<String> {
        Some("admin@alanya.test".to_string())
    }

    async fn send(&self, mail: &OutgoingMail) -> bool {
        self.sent.lock().push(mail.clone());
        true
    }
}

/// Chat model that answers with a fixed reply and keeps the prompts
pub struct CannedChatModel {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl CannedChatModel {
    pub fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl ChatModel for CannedChatModel {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
        self.prompts.lock().push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

// ============================================================================
// Context
// ============================================================================

/// Builder with every repository backed by `db` and an in-memory token store
pub fn memory_context_builder(db: &Arc<MemoryDb>) -> ServiceContextBuilder {
    ServiceContextBuilder::new()
        .user_repo(db.clone())
        .business_repo(db.clone())
        .review_repo(db.clone())
        .category_repo(db.clone())
        .favorite_repo(db.clone())
        .news_repo(db.clone())
        .admin_log_repo(db.clone())
        .user_photo_repo(db.clone())
        .token_store(Arc::new(MemoryTokenStore::new()))
        .jwt_service(Arc::new(JwtService::new(TEST_JWT_SECRET, 900, 604_800)))
}

/// Context over `db` with default settings and disabled gateways
pub fn memory_context(db: &Arc<MemoryDb>) -> ServiceResult<ServiceContext> {
    memory_context_builder(db).build()
}

/// Settings with a custom reset code lifetime
pub fn settings_with_code_ttl(ttl: Duration) -> ServiceSettings {
    ServiceSettings {
        reset_code_ttl: ttl,
        ..ServiceSettings::default()
    }
}

/// Token store wrapper that records the TTL of every write
pub struct TtlRecordingStore {
    inner: MemoryTokenStore,
    ttls: Mutex<Vec<(String, Duration)>>,
}

impl TtlRecordingStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: MemoryTokenStore::new(),
            ttls: Mutex::new(Vec::new()),
        })
    }

    pub fn ttls(&self) -> Vec<(String, Duration)> {
        self.ttls.lock().clone()
    }
}

#[async_trait]
impl TokenStore for TtlRecordingStore {
    async fn put(&self, key: &str, value: &str, ttl: Duration) -> RepoResult<()> {
        self.ttls.lock().push((key.to_string(), ttl));
        self.inner.put(key, value, ttl).await
    }

    async fn get(&self, key: &str) -> RepoResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn take(&self, key: &str) -> RepoResult<Option<String>> {
        self.inner.take(key).await
    }

    async fn take_if_eq(&self, key: &str, expected: &str) -> RepoResult<bool> {
        self.inner.take_if_eq(key, expected).await
    }

    async fn remove(&self, key: &str) -> RepoResult<()> {
        self.inner.remove(key).await
    }
}
