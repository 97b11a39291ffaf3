//! Business entity - a listing in the directory

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{GeoPoint, RatingSummary};

/// A listed business
///
/// `average_rating` and `total_reviews` are a cache of the approved and active
/// reviews; they are only ever written by the review repository's transactional
/// recompute.
#[derive(Debug, Clone, PartialEq)]
pub struct Business {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    pub phone: String,
    pub email: Option<String>,
    pub website: Option<String>,
    pub image_url: Option<String>,
    pub working_hours: Option<String>,
    pub price_range: Option<String>,
    pub category_id: Option<i64>,
    pub owner_id: Option<i64>,
    pub created_by: Option<i64>,
    pub is_active: bool,
    pub is_approved: bool,
    pub is_featured: bool,
    pub average_rating: f64,
    pub total_reviews: i32,
    pub location: Option<GeoPoint>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Business {
    /// Visible on public listings, search, maps and details
    #[inline]
    pub fn is_publicly_visible(&self) -> bool {
        self.is_active && self.is_approved
    }

    #[inline]
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.owner_id == Some(user_id)
    }

    pub fn rating_summary(&self) -> RatingSummary {
        RatingSummary {
            average: self.average_rating,
            count: self.total_reviews,
        }
    }

    /// Approve for publication
    pub fn approve(&mut self) {
        self.is_approved = true;
        self.is_active = true;
        self.updated_at = Utc::now();
    }

    /// Reject: hidden from every public surface
    pub fn reject(&mut self) {
        self.is_approved = false;
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    /// Apply an edit, bumping `updated_at`
    pub fn apply(&mut self, patch: BusinessPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(address) = patch.address {
            self.address = address;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(email) = patch.email {
            self.email = Some(email);
        }
        if let Some(website) = patch.website {
            self.website = Some(website);
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = Some(image_url);
        }
        if let Some(working_hours) = patch.working_hours {
            self.working_hours = Some(working_hours);
        }
        if let Some(price_range) = patch.price_range {
            self.price_range = Some(price_range);
        }
        if let Some(category_id) = patch.category_id {
            self.category_id = Some(category_id);
        }
        if let Some(location) = patch.location {
            self.location = Some(location);
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        if let Some(is_featured) = patch.is_featured {
            self.is_featured = is_featured;
        }
        self.updated_at = Utc::now();
    }
}

/// Who is creating a business; decides the initial approval state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusinessOrigin {
    /// Created from the admin panel: published immediately
    Admin,
    /// Suggested by a signed-in visitor: waits for approval
    User,
    /// Registered by its owner: waits for approval
    Owner,
}

impl BusinessOrigin {
    #[inline]
    pub fn starts_approved(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// Data required to create a business
#[derive(Debug, Clone)]
pub struct NewBusiness {
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    pub phone: String,
    pub email: Option<String>,
    pub website: Option<String>,
    pub image_url: Option<String>,
    pub working_hours: Option<String>,
    pub price_range: Option<String>,
    pub category_id: Option<i64>,
    pub owner_id: Option<i64>,
    pub created_by: Option<i64>,
    pub is_featured: bool,
    pub location: Option<GeoPoint>,
    pub origin: BusinessOrigin,
}

impl NewBusiness {
    /// Approval flag the row is inserted with
    #[inline]
    pub fn is_approved(&self) -> bool {
        self.origin.starts_approved()
    }
}

/// Editable business fields; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct BusinessPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub image_url: Option<String>,
    pub working_hours: Option<String>,
    pub price_range: Option<String>,
    pub category_id: Option<i64>,
    pub location: Option<GeoPoint>,
    /// Admin only
    pub is_active: Option<bool>,
    /// Admin only
    pub is_featured: Option<bool>,
}

impl BusinessPatch {
    /// Drop the fields only an administrator may change
    pub fn without_admin_fields(mut self) -> Self {
        self.is_active = None;
        self.is_featured = None;
        self
    }
}

/// Approval filter for the admin business list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessStatusFilter {
    Pending,
    Approved,
    #[default]
    All,
}

#[cfg(test)]
pub(crate) fn sample_business(id: i64) -> Business {
    let now = Utc::now();
    Business {
        id,
        name: format!("Business {id}"),
        description: None,
        address: "Alanya".to_string(),
        phone: "02420000000".to_string(),
        email: None,
        website: None,
        image_url: None,
        working_hours: None,
        price_range: None,
        category_id: None,
        owner_id: None,
        created_by: None,
        is_active: true,
        is_approved: false,
        is_featured: false,
        average_rating: 0.0,
        total_reviews: 0,
        location: None,
        created_at: now,
        updated_at: now,
    }
}
