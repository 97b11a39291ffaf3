//! Profile service: the signed-in user's own account and photo gallery

use tracing::{info, instrument};

use guide_core::entities::{NewUserPhoto, UserProfilePatch};
use guide_core::value_objects::PhoneNumber;
use guide_core::DomainError;

use crate::dto::{AddPhotoRequest, CurrentUserResponse, UpdateProfileRequest, UserPhotoResponse};

use super::access::load_actor;
use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct ProfileService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProfileService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn me(&self, user_id: i64) -> ServiceResult<CurrentUserResponse> {
        let user = load_actor(self.ctx, user_id).await?;
        Ok(CurrentUserResponse::from(user))
    }

    /// Update profile fields; the phone number is stored normalized
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        user_id: i64,
        request: UpdateProfileRequest,
    ) -> ServiceResult<CurrentUserResponse> {
        let mut user = load_actor(self.ctx, user_id).await?;

        let phone_number = request
            .phone_number
            .as_deref()
            .map(PhoneNumber::normalize)
            .transpose()?;

        user.apply_profile(UserProfilePatch {
            full_name: request.full_name,
            display_name: request.display_name,
            phone_number,
            avatar_url: request.avatar_url,
            bio: request.bio,
            city: request.city,
            country: request.country,
            website: request.website,
        });
        self.ctx.user_repo().update(&user).await?;

        info!(user_id, "Profile updated");
        Ok(CurrentUserResponse::from(user))
    }

    pub async fn photos(&self, user_id: i64) -> ServiceResult<Vec<UserPhotoResponse>> {
        let photos = self.ctx.user_photo_repo().find_by_user(user_id).await?;
        Ok(photos.iter().map(UserPhotoResponse::from).collect())
    }

    #[instrument(skip(self, request))]
    pub async fn add_photo(
        &self,
        user_id: i64,
        request: AddPhotoRequest,
    ) -> ServiceResult<UserPhotoResponse> {
        let photo = self
            .ctx
            .user_photo_repo()
            .create(&NewUserPhoto {
                user_id,
                photo_url: request.photo_url,
                description: request.description,
            })
            .await?;

        info!(photo_id = photo.id, "Photo added");
        Ok(UserPhotoResponse::from(&photo))
    }

    /// Delete one of the user's own photos
    #[instrument(skip(self))]
    pub async fn delete_photo(&self, user_id: i64, photo_id: i64) -> ServiceResult<()> {
        let photo = self
            .ctx
            .user_photo_repo()
            .find_by_id(photo_id)
            .await?
            .filter(|p| p.user_id == user_id)
            .ok_or(DomainError::PhotoNotFound(photo_id))?;

        self.ctx.user_photo_repo().delete(photo.id).await?;
        info!(photo_id, "Photo deleted");
        Ok(())
    }
}
