//! User entity - an account on the directory site

use chrono::{DateTime, Utc};

use crate::value_objects::{PhoneNumber, Roles};

/// User account
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub display_name: Option<String>,
    /// Stored in normalized form (see [`PhoneNumber::normalize`])
    pub phone_number: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub website: Option<String>,
    pub roles: Roles,
    pub is_active: bool,
    pub consent_accepted: bool,
    pub consent_at: Option<DateTime<Utc>>,
    /// Login is refused until this instant passes
    pub lockout_end: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Name shown next to reviews and in listings
    pub fn display_label(&self) -> String {
        if let Some(name) = self.display_name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.to_string();
        }
        if !self.full_name.trim().is_empty() {
            return self.full_name.clone();
        }
        self.email
            .split('@')
            .next()
            .unwrap_or(&self.email)
            .to_string()
    }

    /// Check if the account is locked out at the given instant
    pub fn is_locked_out(&self, now: DateTime<Utc>) -> bool {
        self.lockout_end.is_some_and(|end| end > now)
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.roles.is_admin()
    }

    /// Apply a profile edit, bumping `updated_at`
    pub fn apply_profile(&mut self, patch: UserProfilePatch) {
        if let Some(full_name) = patch.full_name {
            self.full_name = full_name;
        }
        if let Some(display_name) = patch.display_name {
            self.display_name = Some(display_name);
        }
        if let Some(phone) = patch.phone_number {
            self.phone_number = Some(phone.into_inner());
        }
        if let Some(avatar_url) = patch.avatar_url {
            self.avatar_url = Some(avatar_url);
        }
        if let Some(bio) = patch.bio {
            self.bio = Some(bio);
        }
        if let Some(city) = patch.city {
            self.city = Some(city);
        }
        if let Some(country) = patch.country {
            self.country = Some(country);
        }
        if let Some(website) = patch.website {
            self.website = Some(website);
        }
        self.updated_at = Utc::now();
    }
}

/// Data required to create an account
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub full_name: String,
    pub phone_number: Option<PhoneNumber>,
    pub roles: Roles,
    pub consent_accepted: bool,
    pub password_hash: String,
}

/// Profile fields a user may change; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct UserProfilePatch {
    pub full_name: Option<String>,
    pub display_name: Option<String>,
    pub phone_number: Option<PhoneNumber>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub website: Option<String>,
}

#[cfg(test)]
pub(crate) fn sample_user(id: i64) -> User {
    let now = Utc::now();
    User {
        id,
        email: format!("user{id}@example.com"),
        full_name: String::new(),
        display_name: None,
        phone_number: None,
        avatar_url: None,
        bio: None,
        city: None,
        country: None,
        website: None,
        roles: Roles::USER,
        is_active: true,
        consent_accepted: true,
        consent_at: Some(now),
        lockout_end: None,
        created_at: now,
        updated_at: now,
    }
}
