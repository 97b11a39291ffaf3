//! Review entity - a user's star rating and comment on a business

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Rating;

/// A review
///
/// `author_name` and `business_name` are filled in by read queries for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: i64,
    pub business_id: i64,
    pub user_id: i64,
    pub rating: Rating,
    pub comment: String,
    pub is_approved: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub author_name: Option<String>,
    pub business_name: Option<String>,
}

impl Review {
    /// Counted in the business aggregate and shown publicly
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.is_approved && self.is_active
    }
}

/// A validated review ready to insert
#[derive(Debug, Clone)]
pub struct NewReview {
    pub business_id: i64,
    pub user_id: i64,
    pub rating: Rating,
    pub comment: String,
}

impl NewReview {
    /// Validate rating and comment before anything touches storage
    pub fn new(
        business_id: i64,
        user_id: i64,
        rating: i32,
        comment: &str,
    ) -> Result<Self, DomainError> {
        let rating = Rating::new(rating)?;
        let comment = comment.trim();
        if comment.is_empty() {
            return Err(DomainError::EmptyComment);
        }
        Ok(Self {
            business_id,
            user_id,
            rating,
            comment: comment.to_string(),
        })
    }
}

/// Moderation filter for the admin review list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatusFilter {
    Pending,
    #[default]
    All,
}
