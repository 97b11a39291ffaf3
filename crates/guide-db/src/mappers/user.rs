//! User model -> entity mapper

use guide_core::entities::User;
use guide_core::value_objects::Roles;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: model.id,
            email: model.email,
            full_name: model.full_name,
            display_name: model.display_name,
            phone_number: model.phone_number,
            avatar_url: model.avatar_url,
            bio: model.bio,
            city: model.city,
            country: model.country,
            website: model.website,
            roles: Roles::from_i64(model.roles),
            is_active: model.is_active,
            consent_accepted: model.consent_accepted,
            consent_at: model.consent_at,
            lockout_end: model.lockout_end,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
