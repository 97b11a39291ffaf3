//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use chrono::Utc;

use guide_core::entities::{
    AdminLog, Business, Category, FavoriteFan, News, Review, User, UserPhoto,
};
use guide_core::traits::CategoryCount;

use super::responses::{
    AdminLogResponse, BusinessResponse, CategoryCountResponse, CategoryResponse,
    CurrentUserResponse, FavoriteFanResponse, LocationResponse, NewsResponse, ReviewResponse,
    UserPhotoResponse, UserSummaryResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            display_name: user.display_label(),
            phone_number: user.phone_number.clone(),
            avatar_url: user.avatar_url.clone(),
            bio: user.bio.clone(),
            city: user.city.clone(),
            country: user.country.clone(),
            website: user.website.clone(),
            roles: user.roles.names(),
            created_at: user.created_at,
        }
    }
}

impl From<User> for CurrentUserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&User> for UserSummaryResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            display_name: user.display_label(),
            roles: user.roles.names(),
            is_active: user.is_active,
            is_locked_out: user.is_locked_out(Utc::now()),
            lockout_end: user.lockout_end,
            created_at: user.created_at,
        }
    }
}

impl From<&UserPhoto> for UserPhotoResponse {
    fn from(photo: &UserPhoto) -> Self {
        Self {
            id: photo.id,
            photo_url: photo.photo_url.clone(),
            description: photo.description.clone(),
            created_at: photo.created_at,
        }
    }
}

// ============================================================================
// Directory Mappers
// ============================================================================

impl From<&Business> for BusinessResponse {
    fn from(business: &Business) -> Self {
        Self {
            id: business.id,
            name: business.name.clone(),
            description: business.description.clone(),
            address: business.address.clone(),
            phone: business.phone.clone(),
            email: business.email.clone(),
            website: business.website.clone(),
            image_url: business.image_url.clone(),
            working_hours: business.working_hours.clone(),
            price_range: business.price_range.clone(),
            category_id: business.category_id,
            owner_id: business.owner_id,
            is_active: business.is_active,
            is_approved: business.is_approved,
            is_featured: business.is_featured,
            average_rating: business.average_rating,
            total_reviews: business.total_reviews,
            latitude: business.location.map(|l| l.latitude),
            longitude: business.location.map(|l| l.longitude),
            created_at: business.created_at,
        }
    }
}

impl From<Business> for BusinessResponse {
    fn from(business: Business) -> Self {
        Self::from(&business)
    }
}

impl LocationResponse {
    /// Map pin for a business; `None` when it has no coordinates
    pub fn from_business(business: &Business) -> Option<Self> {
        let location = business.location?;
        Some(Self {
            id: business.id,
            name: business.name.clone(),
            address: business.address.clone(),
            latitude: location.latitude,
            longitude: location.longitude,
            average_rating: business.average_rating,
            category_id: business.category_id,
        })
    }
}

impl From<&Category> for CategoryResponse {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            description: category.description.clone(),
            icon: category.icon.clone(),
        }
    }
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self::from(&category)
    }
}

impl From<&Review> for ReviewResponse {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id,
            business_id: review.business_id,
            user_id: review.user_id,
            rating: review.rating.value(),
            comment: review.comment.clone(),
            is_approved: review.is_approved,
            is_active: review.is_active,
            author_name: review.author_name.clone(),
            business_name: review.business_name.clone(),
            created_at: review.created_at,
        }
    }
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self::from(&review)
    }
}

impl From<&News> for NewsResponse {
    fn from(news: &News) -> Self {
        Self {
            id: news.id,
            title: news.title.clone(),
            content: news.content.clone(),
            image_url: news.image_url.clone(),
            author_id: news.author_id,
            view_count: news.view_count,
            published_at: news.published_at,
        }
    }
}

impl From<News> for NewsResponse {
    fn from(news: News) -> Self {
        Self::from(&news)
    }
}

// ============================================================================
// Favorite / Admin Mappers
// ============================================================================

impl From<FavoriteFan> for FavoriteFanResponse {
    fn from(fan: FavoriteFan) -> Self {
        Self {
            user_id: fan.user_id,
            name: fan.name,
            email: fan.email,
            created_at: fan.created_at,
        }
    }
}

impl From<CategoryCount> for CategoryCountResponse {
    fn from(count: CategoryCount) -> Self {
        Self {
            category_id: count.category_id,
            name: count.name,
            business_count: count.business_count,
        }
    }
}

impl From<AdminLog> for AdminLogResponse {
    fn from(log: AdminLog) -> Self {
        Self {
            id: log.id,
            admin_user_id: log.admin_user_id,
            action: log.action.as_str(),
            entity_type: log.entity_type,
            entity_id: log.entity_id,
            description: log.description,
            created_at: log.created_at,
        }
    }
}
