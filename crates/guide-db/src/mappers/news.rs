//! News and user photo model -> entity mappers

use guide_core::entities::{News, UserPhoto};

use crate::models::{NewsModel, UserPhotoModel};

impl From<NewsModel> for News {
    fn from(model: NewsModel) -> Self {
        News {
            id: model.id,
            title: model.title,
            content: model.content,
            image_url: model.image_url,
            author_id: model.author_id,
            view_count: model.view_count,
            published_at: model.published_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<UserPhotoModel> for UserPhoto {
    fn from(model: UserPhotoModel) -> Self {
        UserPhoto {
            id: model.id,
            user_id: model.user_id,
            photo_url: model.photo_url,
            description: model.description,
            is_active: model.is_active,
            created_at: model.created_at,
        }
    }
}
